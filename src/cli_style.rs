use clap::builder::styling::{AnsiColor, Color as AnsiStyleColor, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color, Stylize};
use unicode_width::UnicodeWidthStr;

/// Inner width of the menu frame, in terminal columns.
const FRAME_WIDTH: usize = 40;

pub fn get_styles() -> Styles {
    let ansi = |color: AnsiColor| Some(AnsiStyleColor::Ansi(color));
    let heading = Style::new().bold().underline().fg_color(ansi(AnsiColor::Yellow));
    let good = Style::new().bold().fg_color(ansi(AnsiColor::Green));
    let bad = Style::new().bold().fg_color(ansi(AnsiColor::Red));

    Styles::styled()
        .usage(heading)
        .header(heading)
        .literal(good)
        .valid(good)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(ansi(AnsiColor::BrightBlack)))
}

/// Marquee palette.
pub mod colors {
    use crossterm::style::Color;

    pub const GOLD: Color = Color::Rgb { r: 255, g: 200, b: 60 };
    pub const AMBER: Color = Color::Rgb { r: 255, g: 140, b: 0 };
    pub const GREEN: Color = Color::Rgb { r: 0, g: 220, b: 120 };
    pub const RED: Color = Color::Rgb { r: 255, g: 85, b: 85 };
    pub const BLUE: Color = Color::Rgb { r: 100, g: 149, b: 237 };
    pub const DIM: Color = Color::Rgb { r: 128, g: 128, b: 128 };
    pub const WHITE: Color = Color::Rgb { r: 255, g: 255, b: 255 };
}

pub mod box_chars {
    pub const HORIZONTAL: &str = "─";
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const POINTER: &str = "▶";
    pub const STAR: &str = "★";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Error,
}

impl Status {
    fn marker(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Warning => "⚠",
            Status::Error => "✗",
        }
    }

    fn color(self) -> Color {
        match self {
            Status::Success => colors::GREEN,
            Status::Warning => colors::AMBER,
            Status::Error => colors::RED,
        }
    }
}

pub fn print_status(status: Status, message: &str) {
    println!(
        " {} {}",
        status.marker().with(status.color()).bold(),
        message.with(status.color())
    );
}

pub fn print_success(message: &str) {
    print_status(Status::Success, message);
}

pub fn print_warning(message: &str) {
    print_status(Status::Warning, message);
}

pub fn print_error(message: &str) {
    print_status(Status::Error, message);
}

pub fn print_info(message: &str) {
    println!("{}", message.with(colors::WHITE));
}

pub fn print_banner(location: &str) {
    println!();
    println!(
        "{}",
        "********** My Movies Database **********".with(colors::GOLD).bold()
    );
    println!("{}", format!("  {}", location).with(colors::DIM));
}

pub fn print_goodbye() {
    println!("{}", "Bye! See you later.".with(colors::GOLD).bold());
}

fn frame_line(left: &str, right: &str, fill: usize) -> String {
    format!("{}{}{}", left, box_chars::HORIZONTAL.repeat(fill), right)
}

/// Top edge of the menu frame with the title centered in it.
pub fn print_section_header(title: &str) {
    let label = format!(" {} ", title);
    let remaining = FRAME_WIDTH.saturating_sub(label.width());
    let left = remaining / 2;

    println!();
    println!(
        "{}{}{}",
        frame_line(box_chars::TOP_LEFT, "", left).with(colors::GOLD),
        label.with(colors::GOLD).bold().attribute(Attribute::Italic),
        frame_line("", box_chars::TOP_RIGHT, remaining - left).with(colors::GOLD)
    );
}

pub fn print_section_footer() {
    println!(
        "{}",
        frame_line(box_chars::BOTTOM_LEFT, box_chars::BOTTOM_RIGHT, FRAME_WIDTH).with(colors::GOLD)
    );
}

pub fn print_menu_entry(key: &str, label: &str) {
    println!(
        "  {} {} {}",
        box_chars::POINTER.with(colors::GOLD),
        format!("{:>2}.", key).with(colors::BLUE).bold(),
        label.with(colors::WHITE)
    );
}

pub fn print_movie(title: &str, year: i32, rating: f64) {
    println!(
        "  {} {} {}: {}",
        box_chars::STAR.with(colors::GOLD),
        title.with(colors::WHITE).bold(),
        format!("({})", year).with(colors::DIM),
        rating.to_string().with(colors::GOLD)
    );
}
