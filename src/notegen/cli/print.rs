use colored::Colorize;
use notegen::api::{CmdMessage, MessageLevel};

pub(super) fn print_message(message: &CmdMessage) {
    match message.level {
        MessageLevel::Info => println!("{}", message.content.dimmed()),
        MessageLevel::Success => println!("{}", message.content.green()),
        MessageLevel::Warning => println!("{}", message.content.yellow().bold()),
        MessageLevel::Error => println!("{}", message.content.red().bold()),
    }
}

pub(super) fn print_heading(text: &str) {
    println!("{}", text.bold());
}
