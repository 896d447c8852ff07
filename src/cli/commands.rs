use crate::cli::DisplayArgs;
use crate::config::Settings;
use crate::github::GitHubClient;
use crate::preferences::{Theme, ThemeStore};
use crate::render::chart::{ChartRenderer, TextChart};
use crate::render::terminal::{format_snapshot, sync_chart, Palette};
use crate::session::{
    FetchMode, LoadMoreOutcome, ProfileController, SearchOutcome, SessionSnapshot,
};
use crate::{Error, Result};
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Fold command-line overrides into the loaded settings
pub fn apply_display_args(settings: &mut Settings, args: &DisplayArgs) {
    if let Some(top) = args.top {
        settings.display.top_languages = top;
    }
    if let Some(style) = args.date_style {
        settings.display.date_style = style;
    }
    if let Some(policy) = args.missing_fields {
        settings.display.missing_fields = policy;
    }
    if args.sequential {
        settings.display.fetch_mode = FetchMode::Sequential;
    }
}

fn use_color(args: &DisplayArgs) -> bool {
    !args.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Look up one user, optionally loading extra repository pages
pub async fn lookup(
    settings: Settings,
    username: &str,
    pages: u32,
    json: bool,
    args: &DisplayArgs,
) -> Result<()> {
    let store = ThemeStore::new(&settings.preferences.path);
    let theme = store.load().await;
    let ansi = !json && use_color(args);

    let client = GitHubClient::new(settings.github.clone())?;
    let controller = ProfileController::new(client, settings.controller_options());

    let mut snapshot = match controller.search(username).await? {
        SearchOutcome::Completed(snapshot) => snapshot,
        SearchOutcome::Superseded => {
            return Err(Error::Internal("Search was superseded".to_string()))
        }
    };

    for _ in 1..pages.max(1) {
        match controller.load_more().await? {
            LoadMoreOutcome::Loaded(next) => snapshot = next,
            LoadMoreOutcome::Unavailable | LoadMoreOutcome::Superseded => break,
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let mut chart = TextChart::new(theme, ansi);
        sync_chart(&mut chart, snapshot.languages.as_ref());
        println!("{}", format_snapshot(&snapshot, &chart, Palette::new(theme, ansi)));
    }

    if let Some(quota) = controller.rate_limit_status().await {
        info!(
            "GitHub API quota: {}/{} (resets at {})",
            quota.remaining, quota.limit, quota.reset_at
        );
    }

    Ok(())
}

/// Line-oriented front end holding one controller, chart and theme
pub struct InteractiveSession {
    controller: ProfileController,
    store: ThemeStore,
    chart: TextChart,
    theme: Theme,
    ansi: bool,
}

/// Result of one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Nothing,
    Quit,
}

impl InteractiveSession {
    pub async fn new(controller: ProfileController, store: ThemeStore, ansi: bool) -> Self {
        let theme = store.load().await;
        Self {
            controller,
            store,
            chart: TextChart::new(theme, ansi),
            theme,
            ansi,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub async fn handle(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        match line {
            "" => Ok(Reply::Nothing),
            "quit" | "exit" | "q" => Ok(Reply::Quit),
            "help" | "?" => Ok(Reply::Output(HELP.to_string())),
            "theme" => {
                self.theme = self.theme.toggle();
                let note = match self.store.save(self.theme).await {
                    Ok(()) => "",
                    Err(e) => {
                        // keep the toggle for this session only
                        warn!("Failed to save theme preference: {}", e.log_safe());
                        " (could not save theme)"
                    }
                };
                // recolor in place; the chart is not rebuilt
                self.chart.set_theme(self.theme);
                let snapshot = self.controller.snapshot().await;
                Ok(Reply::Output(format!(
                    "Theme: {}{note}\n\n{}",
                    self.theme.as_str(),
                    self.render(&snapshot)
                )))
            }
            "more" => match self.controller.load_more().await? {
                LoadMoreOutcome::Loaded(snapshot) => self.show(&snapshot).await,
                LoadMoreOutcome::Unavailable => {
                    Ok(Reply::Output("No more repositories to load".to_string()))
                }
                LoadMoreOutcome::Superseded => Ok(Reply::Nothing),
            },
            "retry" => {
                let outcome = self.controller.retry().await;
                self.after_search(outcome).await
            }
            username => {
                let outcome = self.controller.search(username).await;
                self.after_search(outcome).await
            }
        }
    }

    async fn after_search(&mut self, outcome: Result<SearchOutcome>) -> Result<Reply> {
        match outcome {
            Ok(SearchOutcome::Completed(snapshot)) => self.show(&snapshot).await,
            Ok(SearchOutcome::Superseded) => Ok(Reply::Nothing),
            // Lookup failures land in the session error state
            Err(Error::Validation(msg)) => Ok(Reply::Output(msg)),
            Err(_) => {
                let snapshot = self.controller.snapshot().await;
                sync_chart(&mut self.chart, None);
                let mut text = self.render(&snapshot);
                text.push_str("\nType `retry` to try again.");
                Ok(Reply::Output(text))
            }
        }
    }

    async fn show(&mut self, snapshot: &SessionSnapshot) -> Result<Reply> {
        sync_chart(&mut self.chart, snapshot.languages.as_ref());
        let mut text = self.render(snapshot);
        if self.controller.can_load_more().await {
            text.push_str("\n\nType `more` to load more repositories.");
        }
        Ok(Reply::Output(text))
    }

    fn render(&self, snapshot: &SessionSnapshot) -> String {
        format_snapshot(snapshot, &self.chart, Palette::new(self.theme, self.ansi))
    }
}

const HELP: &str = "Commands:
  <username>  look up a GitHub user
  more        load more repositories
  retry       repeat the last search
  theme       toggle light/dark theme
  quit        leave";

/// Run the interactive session on stdin/stdout
pub async fn interactive(
    settings: Settings,
    username: Option<String>,
    args: &DisplayArgs,
) -> Result<()> {
    let client = GitHubClient::new(settings.github.clone())?;
    let controller = ProfileController::new(client, settings.controller_options());
    let store = ThemeStore::new(&settings.preferences.path);
    let mut session = InteractiveSession::new(controller, store, use_color(args)).await;

    println!("{HELP}\n");

    if let Some(username) = username {
        match session.handle(&username).await {
            Ok(Reply::Output(text)) => println!("{text}\n"),
            Ok(_) => {}
            Err(e) => println!("{}\n", e.user_message()),
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        debug!("Interactive input: {:?}", line);
        match session.handle(&line).await {
            Ok(Reply::Output(text)) => println!("{text}\n"),
            Ok(Reply::Nothing) => {}
            Ok(Reply::Quit) => break,
            Err(e) => {
                warn!("Interactive command failed: {}", e.log_safe());
                println!("{}\n", e.user_message());
            }
        }
    }

    Ok(())
}

/// Show or change the stored theme
pub async fn theme(settings: Settings, action: &str) -> Result<()> {
    let store = ThemeStore::new(&settings.preferences.path);

    let theme = match action.trim().to_lowercase().as_str() {
        "show" => store.load().await,
        "toggle" => store.toggle().await?,
        other => {
            let theme: Theme = other.parse()?;
            store.save(theme).await?;
            theme
        }
    };

    println!("{} ({})", theme.as_str(), store.path().display());
    Ok(())
}
