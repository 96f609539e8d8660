use clap::Parser;
use serverlab::cli::{
    handle_completions, handle_config_init, servers, Cli, Commands, ConfigCommands,
};

/// Print a handler's output and pass its error through.
fn print_output(result: Result<String, Box<dyn std::error::Error>>) -> Result<(), Box<dyn std::error::Error>> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => serverlab::cli::serve::run_serve(args).await,
        Commands::Status(args) => print_output(servers::handle_status(&args).await),
        Commands::Servers(args) => print_output(servers::handle_servers(&args).await),
        Commands::Start(args) => print_output(servers::handle_start(&args).await),
        Commands::Stop(args) => print_output(servers::handle_stop(&args).await),
        Commands::Test(args) => print_output(servers::handle_test(&args).await),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => print_output(handle_config_init(&args)),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
