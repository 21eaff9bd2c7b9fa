use colored::*;

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

pub fn print_banner(address: &str, model: &str) {
    println!("{}", " CodeRefine AI Engine ".bold().white().on_blue());
    print_result("Listening on", &format!("http://{}", address));
    print_result("Model", model);
}
