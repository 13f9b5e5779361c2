use colored::Colorize;
use nodeflow_cloud::ReqwestTransport;
use nodeflow_provision::{ProviderFactory, VERIFICATION_FAILED_MESSAGE};

pub async fn handle(provider: &str, token: Option<String>, verbose: bool) -> anyhow::Result<()> {
    let settings = nodeflow_config::load()?;
    let transport = ReqwestTransport::new(settings.http.timeout(), &settings.http.user_agent)?;
    let factory = ProviderFactory::from_settings(transport, &settings);
    let adapter = factory.create_from_str(provider)?;

    println!(
        "{}",
        format!("Verifying {} credentials...", adapter.display_name()).blue()
    );

    let credential_parts: Vec<String> = token.into_iter().collect();
    let result = adapter.verify(&credential_parts).await;

    if result.is_success() {
        println!("{} {}", "✓".green(), result.message());
        if verbose {
            println!("  attempts: {}", result.attempt_count());
        }
        return Ok(());
    }

    tracing::warn!(
        provider = %adapter.provider_type(),
        attempts = result.attempt_count(),
        detail = %result.detailed_message(),
        "Credential verification failed"
    );

    eprintln!("{} {}", "✗".red(), VERIFICATION_FAILED_MESSAGE);
    if verbose {
        eprintln!("  {}", result.detailed_message().dimmed());
        if let Some(errors) = result.errors() {
            for (field, message) in errors {
                eprintln!("  {}: {}", field.yellow(), message);
            }
        }
        eprintln!("  attempts: {}", result.attempt_count());
        if result.is_retryable() {
            eprintln!("  {}", "The provider may recover; try again later.".dimmed());
        }
    }
    std::process::exit(1);
}
