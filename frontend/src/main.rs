//! Users console entry-point: loads settings, wires adapters, and runs the
//! list/edit/delete loop on stdin and stdout.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::io::{BufReader, stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontend::ConsoleSettings;
use frontend::domain::RecordManager;
use frontend::domain::ports::{FixtureSession, FixtureUsersGateway, SessionGuard, UsersGateway};
use frontend::inbound::console::{SessionEnd, run_console};
use frontend::outbound::reqres::{HttpGatewayIdentity, ReqwestUsersGateway};
use frontend::outbound::session::StoredTokenSession;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ConsoleSettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("failed to load console settings: {error}"))?;
    let mut manager = build_manager(&settings)?;

    let mut output = stdout();
    let end = run_console(&mut manager, BufReader::new(stdin()), &mut output)
        .await
        .wrap_err("console I/O failed")?;
    if end == SessionEnd::LoginRequired {
        info!(
            path = %settings.token_path().display(),
            "console needs a stored token"
        );
    }
    Ok(())
}

fn build_manager(settings: &ConsoleSettings) -> Result<RecordManager> {
    let ordering = settings.load_ordering();
    if settings.offline {
        info!("offline mode; using the in-memory directory");
        return Ok(RecordManager::with_ordering(
            Arc::new(FixtureUsersGateway::new()),
            Arc::new(FixtureSession::signed_in()),
            ordering,
        ));
    }

    let base_url = settings.base_url().wrap_err("invalid base_url setting")?;
    let timeout = settings
        .request_timeout()
        .wrap_err("invalid request_timeout_secs setting")?;
    let identity = HttpGatewayIdentity {
        api_key: settings.api_key.clone(),
        ..HttpGatewayIdentity::default()
    };
    let gateway: Arc<dyn UsersGateway> = Arc::new(
        ReqwestUsersGateway::with_identity(base_url, timeout, identity)
            .wrap_err("failed to build users gateway")?,
    );

    let token_path = settings.token_path();
    let session: Arc<dyn SessionGuard> = Arc::new(
        StoredTokenSession::load(&token_path)
            .wrap_err_with(|| format!("failed to read token at {}", token_path.display()))?,
    );
    Ok(RecordManager::with_ordering(gateway, session, ordering))
}
