use clap::Parser;
use miette::Result;
use planar::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    planar::logging::init_tracing(global.verbose, global.quiet);

    match cli.command {
        Commands::Init(args) => planar::cli::commands::init::run(args, &global),
        Commands::Chip(cmd) => planar::cli::commands::chip::run(cmd, &global),
        Commands::Bounds(args) => planar::cli::commands::bounds::run(args, &global),
        Commands::Config(cmd) => planar::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => planar::cli::commands::completions::run(args),
    }
}
