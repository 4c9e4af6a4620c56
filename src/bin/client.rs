use kvmesh::cluster::connector::PeerConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: client server:port KEY [VALUE]");
        eprintln!(" KEY only:  read KEY");
        eprintln!(" KEY/VALUE: write KEY=VALUE");
        return Ok(());
    }

    let server = &args[1];
    let key = &args[2];
    let value = args.get(3);

    // Same handle type the nodes use between themselves; both calls
    // carry the fixed 1-second deadline, and any RPC failure surfaces
    // here as a fatal, non-zero exit.
    let client = PeerConnector::new()?.connect(server)?;

    match value {
        Some(value) => {
            client.write(key, value).await?;
            tracing::info!("wrote: {}={}", key, value);
        }
        None => {
            let value = client.read(key).await?;
            tracing::info!("read:  {}={}", key, value);
        }
    }

    Ok(())
}
