///! Resource quota commands

use crate::api::ApiClient;
use crate::output::{self, ListOutput, OutputFormat};
use crate::QuotaCommands;
use anyhow::Result;
use quotaboard_common::list_view::{build_view, ResourceQuotaProps, ViewContext};
use quotaboard_common::quota::CreateResourceQuotaRequest;
use quotaboard_common::subscription::{fetch_list, ListSnapshot};
use quotaboard_common::{ApiError, Catalog, ResourceQuota};
use std::collections::BTreeMap;

/// Fetch quotas for every requested namespace at once and fold the results
pub async fn fetch_snapshot(api: &ApiClient, cluster: &str, namespaces: &[String]) -> ListSnapshot<ResourceQuota> {
    fetch_list(cluster, namespaces, |namespace| async move {
        api.list_resource_quotas(cluster, namespace.as_deref())
            .await
            .map(|infos| {
                infos
                    .into_iter()
                    .map(|info| ResourceQuota::from_info(info, cluster))
                    .collect::<Vec<_>>()
            })
    })
    .await
}

/// Resolve the view for a snapshot and flatten it to scalar rows
pub fn list_output(
    snapshot: ListSnapshot<ResourceQuota>,
    hide: &[String],
    catalog: &Catalog,
) -> Result<(ListOutput, Vec<ApiError>)> {
    let props = ResourceQuotaProps::new(snapshot.items, snapshot.errors)
        .hide_columns(hide.iter().cloned())
        .reflect_table_in_url(false);
    let config = build_view(props, &ViewContext::new(catalog))?;

    let columns = config.descriptors(catalog);
    let items = config.data.unwrap_or_default();

    Ok((ListOutput::from_columns(&columns, &items), config.errors.unwrap_or_default()))
}

fn parse_hard(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
            _ => anyhow::bail!("invalid hard limit '{}' (expected RESOURCE=QUANTITY)", pair),
        })
        .collect()
}

pub async fn handle_quota_command(
    command: QuotaCommands,
    api: &ApiClient,
    cluster: &str,
    format: OutputFormat,
) -> Result<()> {
    match command {
        QuotaCommands::List { namespace, hide } => {
            let snapshot = fetch_snapshot(api, cluster, &namespace).await;
            let (rows, errors) = list_output(snapshot, &hide, &Catalog::english())?;
            tracing::info!(rows = rows.rows.len(), errors = errors.len(), "listed resource quotas");

            output::print_list(&rows, format)?;
            for error in &errors {
                output::print_error(&error.to_string());
            }
        }

        QuotaCommands::Create { name, namespace, hard } => {
            let request = CreateResourceQuotaRequest {
                name,
                namespace,
                hard: parse_hard(&hard)?,
                labels: BTreeMap::new(),
            };
            let created = api.create_resource_quota(cluster, &request).await?;

            if format == OutputFormat::Table {
                output::print_created("ResourceQuota", &created.name, &created.namespace);
            } else {
                output::print_single(&created, format)?;
            }
        }
    }

    Ok(())
}
