//! setup-xc CLI
//!
//! Runs as a GitHub Actions step: reads `INPUT_VERSION`, installs xc into the
//! runner tool cache and writes `xc-path` to `$GITHUB_OUTPUT`.

// The panic hook and the final error report write to stderr directly
#![allow(clippy::print_stderr)]

use setup_xc::cli::{self, Cli};
use setup_xc::tracing::{TracingConfig, init_tracing};
use setup_xc_core::Settings;
use setup_xc_core::host::{GitHubActionsHost, Host};
use setup_xc_core::tools::Platform;
use setup_xc_tools_xc::XcConfig;

/// Exit code for a failed invocation.
const EXIT_FAILURE: i32 = 1;

fn main() {
    // Tracing may be unusable during a panic; stderr is the reliable channel
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    let host = GitHubActionsHost::from_env();
    let exit_code = rt.block_on(async {
        match run_main(cli, &host).await {
            Ok(()) => 0,
            Err(report) => {
                host.set_failed(&report.to_string());
                eprintln!("{report:?}");
                EXIT_FAILURE
            }
        }
    });
    std::process::exit(exit_code);
}

async fn run_main(cli: Cli, host: &GitHubActionsHost) -> miette::Result<()> {
    init_tracing(TracingConfig {
        format: cli.tracing_format(),
        level: cli.level.into(),
        ..Default::default()
    })?;

    let mut settings = Settings::from_env();
    if let Some(dir) = cli.cache_dir {
        settings = settings.with_cache_dir(dir);
    }

    let installer = setup_xc::build_installer(&settings, XcConfig::default(), Platform::current())?;
    setup_xc::run(host, &installer, cli.xc_version).await?;
    Ok(())
}
