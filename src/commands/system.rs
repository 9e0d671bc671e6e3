pub fn handle_command(input: &str) -> Result<(), String> {
    match input.to_lowercase().as_str() {
        "help" => {
            println!("\n🥗 eco-scan Commands:");
            println!("  scan              - Read a barcode from the scanner and look it up");
            println!("  barcode <code>    - Look up a product by barcode");
            println!("  search <name>     - Look up the first product matching a name");
            println!("  <code> | <name>   - Same as barcode/search, picked automatically");
            println!("  Examples:");
            println!("    - barcode 3017620422003");
            println!("    - search oat milk");
            println!();

            println!("⚙️ System Commands:");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            Ok(())
        },
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            std::process::exit(0);
        },
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string())
    }
}
