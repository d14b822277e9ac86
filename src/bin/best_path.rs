use alloy_primitives::Address;
use bdstable_swap_route::utils::config_loader::RouteConfigLoader;
use bdstable_swap_route::{
    BestPathFinderBuilder, EthCallClient, RouteFinderConfig, Token, UniswapV2FactoryRegistry, UniswapV2RouterQuoter,
};
use clap::Parser;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Find the best swap path between two tokens through the protocol's swap router")]
struct Args {
    /// Token to sell, by configured symbol or address
    from: String,

    /// Token to buy, by configured symbol or address
    to: String,

    /// Amount to sell in whole tokens, e.g. 0.0001
    #[arg(default_value = "1")]
    amount: String,

    /// Path to config file (optional, environment variables are used otherwise)
    #[arg(long)]
    config: Option<String>,

    /// RPC endpoint URL (overrides config)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Quote candidate paths one at a time
    #[arg(long)]
    sequential: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(config_path) => RouteFinderConfig::load_section_from_file(config_path.clone()).await?,
        None => RouteFinderConfig::default(),
    };
    config.apply_env()?;
    if let Some(rpc_url) = args.rpc_url {
        config.rpc.rpc_http_url = rpc_url;
    }
    if args.sequential {
        config.routing.concurrent_pricing = false;
    }
    config.validate()?;

    let token_in = config.resolve_token(&args.from)?;
    let token_out = config.resolve_token(&args.to)?;
    let amount_in = token_in.parse_amount(&args.amount)?;

    let client = Arc::new(EthCallClient::new(config.rpc.rpc_http_url.clone(), config.rpc.http_timeout())?);
    let registry = UniswapV2FactoryRegistry::new(client.clone(), config.contracts.swap_factory)
        .with_max_concurrent_reads(config.routing.max_concurrent_registry_reads);
    let router = UniswapV2RouterQuoter::new(client, config.contracts.swap_router);

    info!(rpc = %config.rpc.rpc_http_url, factory = %config.contracts.swap_factory, router = %config.contracts.swap_router, "Connected");

    let finder = BestPathFinderBuilder::new(registry, router)
        .with_config(config.routing.clone())
        .with_whitelist(config.pair_whitelist()?)
        .build();

    let known_tokens: HashMap<Address, Token> = config.known_tokens().into_iter().map(|t| (t.get_address(), t)).collect();

    let priced = finder.quote_candidates(token_in.get_address(), token_out.get_address(), amount_in).await?;
    for candidate in &priced {
        println!("{:<40} {}", candidate.path.describe(&known_tokens), token_out.to_float(candidate.amount_out));
    }

    let best = bdstable_swap_route::choose_best_path(token_in.get_address(), token_out.get_address(), priced)?;
    println!(
        "Best path for {} {}: {} -> {} {}",
        args.amount,
        token_in,
        best.path.describe(&known_tokens),
        token_out.to_float(best.amount_out),
        token_out
    );

    Ok(())
}
