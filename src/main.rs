use okex_rest::exchanges::okex::ContractType;
use okex_rest::{remote_failure, ExchangeConfig, OkexBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // OKEX_API_KEY / OKEX_SECRET_KEY (environment or .env) enable the account calls below
    #[cfg(feature = "env-file")]
    let config = ExchangeConfig::from_env_file("OKEX");
    #[cfg(not(feature = "env-file"))]
    let config = ExchangeConfig::from_env("OKEX");
    let config = config.unwrap_or_else(|_| ExchangeConfig::read_only());
    let okex = OkexBuilder::new().with_config(config).build()?;

    println!("Futures ticker (btc_usd, this_week)");
    match okex.future.ticker("btc_usd", ContractType::ThisWeek).await {
        Ok(ticker) => println!("{}", ticker),
        Err(e) => println!("Error fetching futures ticker: {}", e),
    }

    println!("Futures depth (btc_usd, this_week, 20)");
    match okex.future.depth("btc_usd", ContractType::ThisWeek, 20, None).await {
        Ok(depth) => println!("{}", depth),
        Err(e) => println!("Error fetching futures depth: {}", e),
    }

    println!("USD/CNY exchange rate");
    match okex.future.exchange_rate().await {
        Ok(rate) => println!("{}", rate),
        Err(e) => println!("Error fetching exchange rate: {}", e),
    }

    println!("Spot ticker (ltc_btc)");
    match okex.spot.ticker("ltc_btc").await {
        Ok(ticker) => println!("{}", ticker),
        Err(e) => println!("Error fetching spot ticker: {}", e),
    }

    println!("Spot klines (ltc_btc, 15min, 20)");
    match okex.spot.kline("ltc_btc", "15min", Some(20), None).await {
        Ok(klines) => println!("{}", klines),
        Err(e) => println!("Error fetching spot klines: {}", e),
    }

    if okex.can_sign() {
        println!("Spot account");
        match okex.spot.userinfo().await {
            Ok(info) => match remote_failure(&info) {
                Some(failure) => println!("Rejected by exchange: {:?}", failure.error_code),
                None => println!("{}", info),
            },
            Err(e) => println!("Error fetching account: {}", e),
        }
    }

    Ok(())
}
