use poem::listener::{Acceptor, Listener, TcpListener};
use poem::{Endpoint, Server};
use reqwest::Url;

use crate::prelude::*;

/// Serves the endpoint on a random local port in the background and returns its base URL.
pub async fn serve(endpoint: impl Endpoint + 'static) -> Result<Url> {
    let acceptor = TcpListener::bind("127.0.0.1:0").into_acceptor().await?;
    let address = acceptor
        .local_addr()
        .into_iter()
        .find_map(|address| address.0.as_socket_addr().copied())
        .context("the stub has no TCP address")?;
    tokio::spawn(Server::new_with_acceptor(acceptor).run(endpoint));
    Ok(Url::parse(&format!("http://{}/", address))?)
}
