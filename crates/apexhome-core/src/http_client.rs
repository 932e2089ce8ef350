use reqwest::Client;

const DISABLE_SYSTEM_PROXY_ENV: &str = "APEXHOME_DISABLE_SYSTEM_PROXY";

pub(crate) fn build_http_client() -> Client {
    let builder = Client::builder().user_agent(concat!("apexhome/", env!("CARGO_PKG_VERSION")));
    let builder = if should_disable_system_proxy() {
        builder.no_proxy()
    } else {
        builder
    };

    builder.build().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Falling back to default HTTP client");
        Client::new()
    })
}

fn should_disable_system_proxy() -> bool {
    if std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some() {
        return true;
    }

    cfg!(test)
}
