use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("url not configured") || msg.contains("api key not configured") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Pass --url and --api-key, export APEXHOME_URL / APEXHOME_API_KEY,");
        eprintln!("  or add them to ~/.config/apexhome/config.toml");
    }

    if msg.contains("invalid credentials") || msg.contains("status 401") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Verify the API key with:");
        eprintln!("  {} apexhome test", "$".dimmed());
    }

    if msg.contains("is not supported for resource") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  List supported operations with:");
        eprintln!("  {} apexhome describe action", "$".dimmed());
    }

    if msg.contains("connection refused") || msg.contains("error sending request") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check that the Apex Home instance is reachable and try again.");
    }

    std::process::exit(1);
}
