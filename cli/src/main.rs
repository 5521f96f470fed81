mod commands;
mod terminal;

use commands::{CommandLine, Commands, audit, profiles};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    print::banner();

    let settings = commands.load_settings()?;
    let cfg = commands.to_config(&settings);

    match commands.command {
        Commands::Audit { profile, cidr, name } => {
            let selection = audit::Selection::new(profile, cidr, name);
            audit::audit(selection, &settings, &cfg).await
        }
        Commands::Profiles => {
            print::header("scan profiles");
            profiles::profiles(&settings);
            Ok(())
        }
    }
}
