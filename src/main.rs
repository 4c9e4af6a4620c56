use std::io;

use tokio::net::TcpListener;

use kvmesh::cluster::handlers::router;
use kvmesh::cluster::node::Node;

const HOST: &str = "127.0.0.1";
const BASE_PORT: u16 = 1989;
const PORT_RANGE: u16 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let (address, listener) = bind_first_free_port(HOST, BASE_PORT, PORT_RANGE).await?;

    let node = Node::new(address.clone())?;

    // A single optional argument is the seed address of an existing
    // cluster. Any bootstrap failure aborts startup: the node must not
    // serve with a half-joined membership view.
    let seed = std::env::args().nth(1);
    node.bootstrap(seed.as_deref()).await?;

    let app = router(node);

    tracing::info!("node listening on {}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds the first available port in `[start, start + range)`.
///
/// Ports already in use are skipped; any other bind error is fatal, as
/// is exhausting the whole range.
async fn bind_first_free_port(
    host: &str,
    start: u16,
    range: u16,
) -> anyhow::Result<(String, TcpListener)> {
    for port in start..start + range {
        let address = format!("{}:{}", host, port);
        match TcpListener::bind(&address).await {
            Ok(listener) => return Ok((address, listener)),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => continue,
            Err(e) => return Err(e.into()),
        }
    }
    anyhow::bail!(
        "no free port in {}:{}..{}",
        host,
        start,
        start + range
    )
}
