use std::fmt::Debug;

use anyhow::{Context, Result};
use futures::{Stream, TryStreamExt};
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{Api, ListParams},
    Client, Resource,
};
use serde::de::DeserializeOwned;

/// Page size used for list calls unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Lazily walk every page of a list call, following the server's `continue`
/// token until it comes back absent or empty.
pub fn list_pages<K>(api: Api<K>, page_size: u32) -> impl Stream<Item = Result<Vec<K>>>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    // None: exhausted. Some(None): first page. Some(Some(token)): next page.
    futures::stream::try_unfold(Some(None::<String>), move |cursor| {
        let api = api.clone();
        async move {
            let Some(token) = cursor else {
                return Ok::<_, anyhow::Error>(None);
            };

            let mut params = ListParams::default().limit(page_size);
            if let Some(token) = &token {
                params = params.continue_token(token);
            }

            let page = api.list(&params).await?;
            let next = page.metadata.continue_.filter(|t| !t.is_empty());
            tracing::debug!(
                kind = %K::kind(&()),
                items = page.items.len(),
                more = next.is_some(),
                "fetched page"
            );

            Ok(Some((page.items, next.map(Some))))
        }
    })
}

/// List every `K` in `namespace` into one snapshot, page by page.
pub async fn list_all<K>(client: Client, namespace: &str, page_size: u32) -> Result<Vec<K>>
where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Debug,
{
    let api: Api<K> = Api::namespaced(client, namespace);
    let plural = K::plural(&());

    list_pages(api, page_size)
        .try_concat()
        .await
        .with_context(|| format!("cannot list {plural} in namespace '{namespace}'"))
}
