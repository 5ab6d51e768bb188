use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;

fn colored(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

/// Help output colors for the command line.
pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(colored(AnsiColor::Yellow).bold().underline())
        .header(colored(AnsiColor::Yellow).bold().underline())
        .literal(colored(AnsiColor::Green).bold())
        .placeholder(colored(AnsiColor::BrightBlack))
        .valid(colored(AnsiColor::Green).bold())
        .invalid(colored(AnsiColor::Red).bold())
        .error(colored(AnsiColor::Red).bold())
}
