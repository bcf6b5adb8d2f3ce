use tipjar::{LocalTipSigner, TipConfig, TipSigner};
use tipjar_client::{HttpPaymentTransport, PaymentSession};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let private_key =
        std::env::var("EVM_PRIVATE_KEY").expect("EVM_PRIVATE_KEY environment variable is required");

    let recipient =
        std::env::var("TIP_RECIPIENT").expect("TIP_RECIPIENT environment variable is required");

    let amount = std::env::var("TIP_AMOUNT").unwrap_or_else(|_| "0.10".to_string());
    let message = std::env::var("TIP_MESSAGE").ok();

    let mut config = TipConfig::default();
    if let Ok(api_url) = std::env::var("TIPJAR_API_URL") {
        config.api_url = api_url;
    }

    let signer = LocalTipSigner::new(&private_key).expect("invalid EVM_PRIVATE_KEY");
    let from = signer.address().expect("local signer has an address");

    println!("Tipping {amount} {} to {recipient}", config.token_symbol);
    println!("  From:     {from}");
    println!("  Endpoint: {}\n", config.payments_url());

    let transport = HttpPaymentTransport::new(config.payments_url());
    let session = PaymentSession::with_config(signer, transport, config);

    let result = session.submit(&amount, &recipient, message.as_deref()).await;

    if result.success {
        println!("Payment settled.");
        println!("  tx: {}", result.tx_hash.unwrap_or_default());
    } else {
        eprintln!(
            "Payment failed: {}",
            result.error.unwrap_or_else(|| "unknown error".to_string())
        );
        std::process::exit(1);
    }
}
