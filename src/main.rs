use clap::Parser;
use miette::Result;
use kotoba::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => kotoba::cli::commands::init::run(args),
        Commands::Term(cmd) => kotoba::cli::commands::term::run(cmd, &global),
        Commands::Search(args) => kotoba::cli::commands::search::run(args, &global),
        Commands::Browse(args) => kotoba::cli::commands::browse::run(args, &global),
        Commands::Explain(args) => kotoba::cli::commands::explain::run(args, &global),
        Commands::Export(args) => kotoba::cli::commands::export::run(args, &global),
        Commands::Status(args) => kotoba::cli::commands::status::run(args, &global),
        Commands::Completions(args) => kotoba::cli::commands::completions::run(args),
    }
}
