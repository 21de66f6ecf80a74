use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = csprojman_cli::main(std::env::args().collect::<Vec<String>>().as_slice()).await
    {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
