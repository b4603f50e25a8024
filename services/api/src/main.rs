use rentroll_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("rentroll error: {err}");
        std::process::exit(1);
    }
}
