use std::{sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use kino_config::ClientConfig;
use kino_model::ContentId;
use kino_player::{
    domains::{
        player::{PlayerCommand, SessionEvent},
        session::{FileStorage, SessionContext, User, UserRole},
        watch::{WatchPage, WatchServices},
    },
    infra::{
        ApiClient,
        media::{HeadlessDisplay, SimulatedMedia},
        services::WatchApiAdapter,
    },
};
use log::LevelFilter;

/// Open a title against a Kino server and play it headlessly, saving watch
/// progress the way the watch page does.
#[derive(Debug, Parser)]
#[command(name = "kino-watch", version, about)]
struct Args {
    /// Content id to open.
    #[arg(required_unless_present = "logout")]
    content_id: Option<ContentId>,

    /// Server base URL. Overrides KINO_SERVER_URL.
    #[arg(long)]
    server: Option<String>,

    /// Store a sign-in before opening the title.
    #[arg(long, requires = "username")]
    token: Option<String>,

    /// Username stored with --token.
    #[arg(long, requires = "token")]
    username: Option<String>,

    /// Forget the stored sign-in and exit.
    #[arg(long, conflicts_with_all = ["token", "username"])]
    logout: bool,

    /// How long to keep playing before leaving the page.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "30s")]
    play_for: Duration,
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("kino_player", LevelFilter::Debug)
        .filter_module("kino_watch", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = Args::parse();
    let mut config = ClientConfig::load()?;
    if let Some(server) = args.server.as_deref() {
        config = config.with_server_url(server)?;
    }

    let storage = FileStorage::in_data_dir(config.data_dir.as_deref())
        .context("failed to open session storage")?;
    log::debug!("Session storage at {}", storage.path().display());

    if args.logout {
        SessionContext::clear(&storage)?;
        println!("Signed out");
        return Ok(());
    }
    if let (Some(token), Some(username)) = (args.token, args.username) {
        let user = User {
            id: username.clone(),
            username,
            role: UserRole::User,
            status: "active".to_string(),
        };
        SessionContext::store(&storage, token, user)?;
    }
    let session = SessionContext::restore(&storage)?;
    let Some(content_id) = args.content_id else {
        anyhow::bail!("a content id is required");
    };

    let api = Arc::new(
        ApiClient::new(&config.server_url)?
            .with_token(session.token().map(str::to_owned)),
    );
    let services = WatchServices::from_adapter(Arc::new(WatchApiAdapter::new(api)));

    let media = SimulatedMedia::new();
    let mut page = match WatchPage::mount(
        &session,
        content_id,
        &services,
        Box::new(media.clone()),
        Box::new(HeadlessDisplay),
        &config.player,
    )
    .await
    {
        Ok(page) => page,
        Err(err) => {
            log::error!("{}", err);
            println!("Cannot open title ({}); go to {:?}", err, err.redirect());
            return Ok(());
        }
    };
    println!("Now playing: {}", page.content().heading());

    let handle = page.player().handle();
    handle.send(SessionEvent::Media(media.load(page.content().duration_seconds)));
    if !config.player.autoplay {
        handle.send(SessionEvent::Command(PlayerCommand::TogglePlay));
    }

    let interval = config.player.progress_interval();
    let ticker_media = media.clone();
    let ticker_handle = handle.clone();
    let ticker = tokio::spawn(async move {
        let mut clock = tokio::time::interval(interval);
        clock.tick().await;
        loop {
            clock.tick().await;
            for event in ticker_media.tick(interval) {
                if !ticker_handle.send(SessionEvent::Media(event)) {
                    return;
                }
            }
        }
    });

    tokio::select! {
        _ = page.player_mut().run() => {}
        _ = tokio::time::sleep(args.play_for) => {}
    }
    ticker.abort();
    if let Some(route) = page.redirect() {
        println!(
            "Stream unavailable ({}); go to {:?}",
            page.player().load_error().unwrap_or_default(),
            route
        );
    }
    page.unmount();

    let player = page.player();
    println!(
        "Stopped at {} ({:?}), last saved position: {}",
        player.state().status_line(),
        player.phase(),
        player
            .last_saved_position()
            .map(|secs| format!("{secs:.0}s"))
            .unwrap_or_else(|| "none".to_string()),
    );
    Ok(())
}
