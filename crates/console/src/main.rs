// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # cmp-forms-console
//!
//! Drives the record wizards from a terminal against a live backend, or
//! against an echoing transport with `--dry-run`.
//!
//! ```text
//! cmp-forms-console list --kind asset --search laptop
//! cmp-forms-console show --kind incident --id inc-7
//! cmp-forms-console save-draft --kind asset --data asset.json
//! cmp-forms-console publish --kind data-element --id d-1 --data de.json
//! cmp-forms-console archive --kind vendor --id v-3
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cmp_forms::{FormController, Location, Navigator, list_endpoint};
use cmp_forms_client::{
    ClientConfig, FileStore, KeyValueStore, ListAdapter, ListState, MemoryStore, PageRequest,
    ResourceClient, ScriptedTransport, Transport, UreqTransport,
};
use cmp_forms_domain::kinds::{Asset, CollectionPoint, DataElement, DparRequest, Incident, Vendor};
use cmp_forms_domain::{FormData, RecordKind};
use color_eyre::eyre::{Context, bail};
use color_eyre::Result;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();

    if let Err(err) = args.run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the backend API
    #[arg(long, env = "CMP_API_BASE_URL")]
    base_url: Option<String>,

    /// JSON file the bearer token is stored in
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Bearer token; written to `--token-file` when both are given
    #[arg(long, env = "CMP_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Echo requests back instead of calling the backend
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// List records of a kind
    List {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = cmp_forms_client::DEFAULT_PAGE_SIZE)]
        size: u32,
        #[arg(long)]
        search: Option<String>,
        /// Extra filter as `key=value`; repeatable
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },

    /// Load a record into its wizard and print the form
    Show {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long)]
        id: String,
    },

    /// Fill the wizard from a JSON file and save it as a draft
    SaveDraft(WizardArgs),

    /// Fill the wizard from a JSON file, save it and publish it
    Publish(WizardArgs),

    /// Archive a saved record
    Archive {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long)]
        id: String,
    },
}

#[derive(Clone, Debug, clap::Args)]
struct WizardArgs {
    #[arg(long, value_enum)]
    kind: Kind,
    /// Record id, or `create` for a new record
    #[arg(long, default_value = "create")]
    id: String,
    /// JSON object merged over the loaded form
    #[arg(long)]
    data: Option<PathBuf>,
    /// Step the draft is saved from
    #[arg(long)]
    step: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Asset,
    Incident,
    CollectionPoint,
    DataElement,
    Dpar,
    Vendor,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    async fn run(self) -> Result<()> {
        let client: ResourceClient = self.client()?;
        let kind: Kind = self.command.kind();
        match kind {
            Kind::Asset => self.command.run::<Asset>(client).await,
            Kind::Incident => self.command.run::<Incident>(client).await,
            Kind::CollectionPoint => self.command.run::<CollectionPoint>(client).await,
            Kind::DataElement => self.command.run::<DataElement>(client).await,
            Kind::Dpar => self.command.run::<DparRequest>(client).await,
            Kind::Vendor => self.command.run::<Vendor>(client).await,
        }
    }

    fn client(&self) -> Result<ResourceClient> {
        let mut config: ClientConfig =
            ClientConfig::from_env().wrap_err("Invalid client configuration")?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        let store: Arc<dyn KeyValueStore> = match &self.token_file {
            Some(path) => Arc::new(FileStore::new(path.clone())),
            None => Arc::new(MemoryStore::new()),
        };
        if let Some(token) = &self.token {
            store
                .set(&config.token_key, token)
                .wrap_err("Failed to store the bearer token")?;
        }

        let transport: Arc<dyn Transport> = if self.dry_run {
            info!("dry run, requests are echoed back");
            Arc::new(ScriptedTransport::echo())
        } else {
            Arc::new(UreqTransport::new(config.timeout))
        };

        info!(base_url = %config.base_url, "Using backend");
        Ok(ResourceClient::new(config, transport, store))
    }
}

impl Command {
    const fn kind(&self) -> Kind {
        match self {
            Self::List { kind, .. } | Self::Show { kind, .. } | Self::Archive { kind, .. } => {
                *kind
            }
            Self::SaveDraft(args) | Self::Publish(args) => args.kind,
        }
    }

    async fn run<K: RecordKind>(self, client: ResourceClient) -> Result<()> {
        match self {
            Self::List {
                page,
                size,
                search,
                filters,
                ..
            } => {
                let request = PageRequest {
                    page,
                    page_size: size,
                    search: search.filter(|s| !s.trim().is_empty()),
                    filters: filters.into_iter().collect::<BTreeMap<_, _>>(),
                };
                list::<K>(client, request).await
            }
            Self::Show { id, .. } => show::<K>(client, &id).await,
            Self::SaveDraft(args) => {
                let controller: FormController<K> = prepare::<K>(client, &args).await?;
                let outcome = controller.save_draft().await?;
                info!(id = outcome.id(), "{outcome:?}");
                print_notice(&controller);
                Ok(())
            }
            Self::Publish(args) => {
                let controller: FormController<K> = prepare::<K>(client, &args).await?;
                let outcome = controller.publish().await?;
                info!(
                    id = outcome.saved.id(),
                    transitioned = outcome.transitioned,
                    "published"
                );
                print_notice(&controller);
                Ok(())
            }
            Self::Archive { id, .. } => {
                let (controller, record_id) =
                    FormController::<K>::for_route(client, Arc::new(LogNavigator), &id, "")?;
                controller.load(record_id).await?;
                let archived: String = controller.archive().await?;
                info!(id = %archived, "archived");
                print_notice(&controller);
                Ok(())
            }
        }
    }
}

/// Logs every navigation the wizard asks for.
#[derive(Debug, Default)]
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, location: Location) {
        info!(location = %location, "navigate");
    }
}

async fn list<K: RecordKind>(client: ResourceClient, request: PageRequest) -> Result<()> {
    let mut adapter: ListAdapter = ListAdapter::with_request(client, list_endpoint::<K>(), request);
    adapter.refresh().await?;

    match adapter.state() {
        ListState::Loaded(page) => {
            for item in &page.items {
                println!("{}", serde_json::to_string(item)?);
            }
            info!(
                page = page.current_page,
                total_pages = page.total_pages,
                "{} {}(s)",
                page.items.len(),
                K::NAME
            );
        }
        ListState::Empty(page) => {
            info!(
                page = page.current_page,
                total_pages = page.total_pages,
                "No {} records found",
                K::NAME
            );
        }
        ListState::Failed(message) => bail!(message),
        ListState::Idle | ListState::Loading => {}
    }
    Ok(())
}

async fn show<K: RecordKind>(client: ResourceClient, id: &str) -> Result<()> {
    let (controller, record_id) =
        FormController::<K>::for_route(client, Arc::new(LogNavigator), id, "")?;
    controller.load(record_id).await?;
    println!("{}", serde_json::to_string_pretty(&controller.form())?);
    if let Some(status) = controller.status() {
        info!("status: {}", status.as_str());
    }
    Ok(())
}

/// Loads the record and merges the data file over its form.
async fn prepare<K: RecordKind>(
    client: ResourceClient,
    args: &WizardArgs,
) -> Result<FormController<K>> {
    let (controller, record_id) =
        FormController::<K>::for_route(client, Arc::new(LogNavigator), &args.id, "")?;
    controller.load(record_id).await?;

    if let Some(path) = &args.data {
        let raw: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let Value::Object(overrides) = serde_json::from_str::<Value>(&raw)
            .wrap_err_with(|| format!("Failed to parse {}", path.display()))?
        else {
            bail!("{} must contain a JSON object", path.display());
        };

        let mut data: FormData = controller.form_data()?;
        data.extend(overrides);
        let form: K::Form = serde_json::from_value(Value::Object(data))
            .wrap_err_with(|| format!("{} does not fit the {} form", path.display(), K::NAME))?;
        controller.set_form(form);
    }

    if let Some(step) = args.step {
        controller.go_to_step(step)?;
    }
    Ok(controller)
}

fn print_notice<K: RecordKind>(controller: &FormController<K>) {
    if let Some(notice) = controller.view().notice {
        info!("{notice}");
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}
