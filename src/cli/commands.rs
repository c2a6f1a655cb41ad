//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::load_navigation;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Label, LocalizedDisplayable, Navigation, TreeDisplay};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file, uris }) => cmd_tree(file, *uris),
        Some(Commands::Uris { file }) => cmd_uris(file),
        Some(Commands::Node { file, path }) => cmd_node(file, path),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show { dir } => cmd_config_show(dir.as_deref()),
            ConfigCommands::Path => cmd_config_path(),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "navtree", &mut io::stdout());
            Ok(())
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| CliError::Usage(e.to_string())),
    }
}

fn load(file: &Path) -> CliResult<(Settings, Navigation)> {
    let settings = Settings::load(file.parent())?;
    debug!("settings: {:?}", settings);
    let navigation = load_navigation(file, &settings)?;
    Ok((settings, navigation))
}

#[instrument]
fn cmd_tree(file: &Path, uris: bool) -> CliResult<()> {
    let (settings, navigation) = load(file)?;
    let label = if uris || settings.show_uris {
        Label::NameAndUri
    } else {
        Label::Name
    };
    output::header(&format!(
        "{} (priority {})",
        navigation.site_id(),
        navigation.priority()
    ));
    output::info(&navigation.tree().to_tree_string(navigation.root(), label));
    Ok(())
}

#[instrument]
fn cmd_uris(file: &Path) -> CliResult<()> {
    let (_, navigation) = load(file)?;
    let tree = navigation.tree();
    let root = navigation.root();

    if tree.base_uri(root)?.is_none() {
        output::warning("site has no base_uri; URIs cannot be resolved");
    }
    for (id, _) in tree.iter_from(root).skip(1) {
        let path = tree.path(id)?.join("/");
        let uri = tree
            .uri(id)?
            .map(|u| u.into_string())
            .unwrap_or_else(|| "-".to_string());
        output::info(&format!("{path}\t{uri}"));
    }
    Ok(())
}

#[instrument]
fn cmd_node(file: &Path, path: &str) -> CliResult<()> {
    let (_, navigation) = load(file)?;
    let id = navigation
        .resolve(path)?
        .ok_or_else(|| CliError::NodeNotFound(path.to_string()))?;
    let tree = navigation.tree();
    let node = tree.node(id)?;
    let uri = tree.uri(id)?;

    output::header(node.name());
    output::field("uri", &uri.map(|u| u.into_string()).unwrap_or_else(|| "-".into()));
    output::field("visibility", &node.data.visibility);
    output::field("icon", node.data.icon_name.as_deref().unwrap_or("-"));
    output::field("loaded", &node.data.nodes_loaded);
    output::field("children", &node.children().len());

    let names = node.data.display_names();
    if let Some(value) = names.value() {
        output::field("label", value);
    }
    for (locale, text) in names.localized() {
        output::detail(&format!("{locale}: {text}"));
    }
    Ok(())
}

fn cmd_config_show(dir: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(dir)?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::field("global", &path.display()),
        None => output::field("global", "<no config directory>"),
    }
    output::field("local", &local_config_path(Path::new(".")).display());
    Ok(())
}
