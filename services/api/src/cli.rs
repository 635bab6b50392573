use crate::demo::{
    run_demo, run_score, run_types_list, run_types_show, DemoArgs, ScoreArgs, TypeShowArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use investor_type::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Investor Type Quiz",
    about = "Serve, score, and browse the investor-type personality quiz",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score answers given on the command line or in a CSV answer sheet
    Score(ScoreArgs),
    /// Browse the investor type catalog
    Types {
        #[command(subcommand)]
        command: TypesCommand,
    },
    /// Walk through a scripted quiz session end to end
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TypesCommand {
    /// List every type with its code and name
    List,
    /// Show the full result page for one code
    Show(TypeShowArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Types {
            command: TypesCommand::List,
        } => run_types_list(),
        Command::Types {
            command: TypesCommand::Show(args),
        } => run_types_show(args),
        Command::Demo(args) => run_demo(args),
    }
}
