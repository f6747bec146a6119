use solaria::api::*;
use solaria::core::*;
use solaria::document::DirectorySink;
use tracing_subscriber::EnvFilter;

/// Usage: `submit_factura <transaction-id> [token]`
///
/// The API base URL comes from `SOLARIA_API_URL`.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let transaction_id = args.next();
    let session = args.next().map_or_else(Session::anonymous, Session::bearer);

    let config = ApiConfig::from_env().expect("invalid API configuration");
    println!("API: {}", config.base_url());
    let client = ApiClient::new(config, session).expect("failed to build client");

    // Show the transaction being invoiced, if the API knows it.
    if let Some(id) = &transaction_id {
        match client.get_transactions().await {
            Ok(list) => match list.iter().find(|t| &t.id == id) {
                Some(t) => println!("Transaction {}: total {}", t.id, t.total_amount),
                None => println!("Transaction {id} not in the transaction list"),
            },
            Err(e) => eprintln!("could not list transactions: {e}"),
        }
    }

    let form = CustomerFormBuilder::new("Soda La Esquina", "3101123456", "caja@laesquina.cr")
        .business("Soda La Esquina S.A.")
        .phone_number("+506 2222-3333")
        .form();

    let mut workflow = InvoiceWorkflow::new(client, DirectorySink::new("downloads"));
    let notification = match workflow.submit(&form, transaction_id.as_deref()).await {
        Ok(outcome) => {
            println!("NumeroConsecutivo: {}", outcome.document.consecutive_number);
            Notification::saved(&outcome.saved)
        }
        Err(e) => Notification::from_error(&e),
    };

    println!("[{:?}] {}", workflow.state(), notification.message());
}
