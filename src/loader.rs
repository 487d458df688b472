use std::sync::Mutex;

use anyhow::{anyhow, Result};
use cap_std::fs::Dir;
use reqwest::Client;
use scraper::{Html, Selector};
use tokio::time::Duration;
use url::Url;

use crate::{
    config::Remote,
    contact::Contact,
    csv,
    store::{Mutation, Store},
};

/// Default list bundled with the application so the directory is never empty
/// while slower sources are pending.
const DEFAULT_CSV: &str = include_str!("../data/defaults.csv");

/// Resolves the initial contact list, best source first:
/// persisted edits, then the bundled defaults, then a minimal sample.
///
/// The persisted list wins outright because it reflects the user's latest
/// edits. Whatever fallback is chosen instead is persisted immediately so the
/// next start finds it. Storage failures are logged and fall through to the
/// next source.
pub fn load_initial(dir: &Dir) -> Vec<Contact> {
    match Store::read(dir) {
        Ok(contacts) if !contacts.is_empty() => {
            tracing::info!("Loaded {} persisted contacts", contacts.len());

            return contacts;
        }
        Ok(_) => tracing::debug!("No persisted contacts"),
        Err(err) => tracing::warn!("Failed to read persisted contacts: {:#}", err),
    }

    let contacts = embedded_or_sample(csv::parse(DEFAULT_CSV));
    tracing::info!("Loaded {} embedded contacts", contacts.len());

    let store = Store::new(contacts);
    store.persist(dir);

    store.into_contacts()
}

fn embedded_or_sample(embedded: Vec<Contact>) -> Vec<Contact> {
    if !embedded.is_empty() {
        embedded
    } else {
        sample_contacts()
    }
}

/// Last resort when neither persisted nor embedded contacts are usable.
fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact {
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            internal_number: "1001".to_owned(),
            wireless_number: "+32 123 456 789".to_owned(),
            function: "Manager".to_owned(),
            direct_line: "+32 123 456 790".to_owned(),
            gsm_number: "+32 123 456 791".to_owned(),
            fax_number: "+32 123 456 792".to_owned(),
        },
        Contact {
            first_name: "Jane".to_owned(),
            last_name: "Smith".to_owned(),
            internal_number: "1002".to_owned(),
            wireless_number: "+32 123 456 793".to_owned(),
            function: "Developer".to_owned(),
            direct_line: "+32 123 456 794".to_owned(),
            gsm_number: "+32 123 456 795".to_owned(),
            fax_number: "+32 123 456 796".to_owned(),
        },
    ]
}

/// Opportunistic upgrade from the remote CSV resource.
///
/// Runs in the background after start-up. Candidate paths are tried in
/// sequence until one returns a successful response with usable records,
/// which then replace the current list. Every failure is logged and the
/// previously loaded list stays authoritative.
pub async fn refresh(dir: &Dir, remote: &Remote, store: &Mutex<Store>) {
    let base_url = match &remote.base_url {
        Some(base_url) => base_url,
        None => {
            tracing::debug!("No remote base URL configured");

            return;
        }
    };

    let client = match Client::builder()
        .user_agent("contact-directory loader")
        .timeout(Duration::from_secs(300))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!("Failed to start HTTP client: {:#}", err);

            return;
        }
    };

    for path in &remote.paths {
        match fetch_candidate(&client, base_url, path).await {
            Ok(text) => {
                if adopt_remote(store, dir, &text) {
                    tracing::info!("Adopted remote contacts from {}", path);

                    return;
                }

                tracing::warn!("Remote resource {} contained no valid records", path);
            }
            Err(err) => tracing::debug!("Candidate {} failed: {:#}", path, err),
        }
    }

    tracing::warn!("All remote candidates failed, keeping current contacts");
}

async fn fetch_candidate(client: &Client, base_url: &Url, path: &str) -> Result<String> {
    let url = base_url.join(path)?;

    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    if path.ends_with(".html") {
        extract_embedded_csv(&text).ok_or_else(|| anyhow!("Missing CSV data element"))
    } else {
        Ok(text)
    }
}

/// The HTML fallback document carries the CSV text inside the element with
/// id `csvData`.
fn extract_embedded_csv(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#csvData").unwrap();

    let element = document.select(&selector).next()?;

    Some(element.text().collect())
}

fn adopt_remote(store: &Mutex<Store>, dir: &Dir, text: &str) -> bool {
    let contacts = csv::parse(text);

    if contacts.is_empty() {
        return false;
    }

    let mut store = store.lock().unwrap();
    store.apply(Mutation::Replace(contacts));
    store.persist(dir);

    true
}
