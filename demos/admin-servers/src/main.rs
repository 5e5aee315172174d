//! Admin servers demo
//!
//! Lists the servers of a cluster, optionally narrowed to one pool.
//!
//! ```text
//! RIVET_TOKEN=... cargo run -p admin-servers-demo -- <cluster_id> [pool]
//! ```
//!
//! `RIVET_API_URL` overrides the API endpoint and `RUST_LOG` the log filter.

#![allow(clippy::print_stdout)]

use std::time::Duration;

use rivet_api::prelude::*;
use rivet_api::resources::servers::{ListServersResponse, PoolType, ServerFilter};
use tracing_subscriber::EnvFilter;

fn build_client(base_url: Option<String>, token: Option<String>) -> rivet_api::Result<RivetClient> {
    let http = HyperClient::builder()
        .timeout(Duration::from_secs(60))
        .with_logging()
        .build();

    let mut builder = RivetClient::builder().http_client(http);
    if let Some(base_url) = base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(token) = token {
        builder = builder.token(token);
    }
    builder.build()
}

async fn list_servers(
    client: &RivetClient,
    cluster_id: Uuid,
    pool: Option<PoolType>,
) -> rivet_api::Result<Raw<ListServersResponse>> {
    let mut filter = ServerFilter::new();
    if let Some(pool) = pool {
        filter = filter.pool(pool);
    }

    client
        .servers()
        .with_options(CallOptions::new().timeout(Duration::from_secs(10)))
        .list(cluster_id, &filter)
        .await
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(cluster_id) = args.next() else {
        println!("usage: admin-servers <cluster_id> [pool]");
        return Ok(());
    };
    let cluster_id: Uuid = cluster_id.parse()?;
    let pool = args.next().map(|raw| raw.parse::<PoolType>()).transpose()?;

    let client = build_client(
        std::env::var("RIVET_API_URL").ok(),
        std::env::var("RIVET_TOKEN").ok(),
    )?;

    match list_servers(&client, cluster_id, pool).await {
        Ok(servers) => {
            for server in &servers.servers {
                println!(
                    "{}  {:<16}  {:<15}  {}",
                    server.server_id,
                    server.pool_type.to_string(),
                    server.public_ip.as_deref().unwrap_or("-"),
                    server.datacenter_id,
                );
            }
            tracing::info!(count = servers.servers.len(), "listed servers");
        }
        Err(err) if err.kind() == Some(ErrorKind::Forbidden) => {
            println!("the token is not allowed to list servers: {err}");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    #[test]
    fn pool_argument_uses_wire_names() {
        for pool in [PoolType::Job, PoolType::Gg, PoolType::PegboardIsolate] {
            assert_eq!(pool.to_string().parse::<PoolType>().ok(), Some(pool));
        }
        assert!("nope".parse::<PoolType>().is_err());
    }

    #[tokio::test]
    async fn test_list_servers_by_pool() {
        let mock_server = MockServer::start().await;
        let cluster_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/admin/clusters/{cluster_id}/servers")))
            .and(query_param("pool", "ats"))
            .and(header("Authorization", "Bearer admin"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"servers":[]}"#, "application/json"))
            .mount(&mock_server)
            .await;

        let client = build_client(Some(mock_server.uri()), Some("admin".to_string())).expect("client");
        let servers = list_servers(&client, cluster_id, Some(PoolType::Ats))
            .await
            .expect("servers");

        assert!(servers.servers.is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_is_classified() {
        let mock_server = MockServer::start().await;
        let cluster_id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/admin/clusters/{cluster_id}/servers")))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_raw(r#"{"code":"FORBIDDEN","message":"admin only"}"#, "application/json"),
            )
            .mount(&mock_server)
            .await;

        let client = build_client(Some(mock_server.uri()), None).expect("client");
        let err = list_servers(&client, cluster_id, None)
            .await
            .expect_err("forbidden");

        assert_eq!(err.kind(), Some(ErrorKind::Forbidden));
        assert_eq!(err.status(), Some(403));
    }
}
