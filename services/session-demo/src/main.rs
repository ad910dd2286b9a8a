use anyhow::Result;
use session_demo::commands::{self, Command};
use session_demo::observability::init_tracing;
use session_demo::Config;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.tracing);

    info!(
        service = %config.tracing.service_name,
        scheme = config.codec.scheme.as_str(),
        max_age_secs = config.codec.max_age_secs(),
        digest_length = config.codec.signature_len(),
        "Starting session demo"
    );

    let codec = config.build_codec()?;

    match Command::parse(std::env::args().skip(1))? {
        Command::Demo { subject } => {
            let report = commands::demo(&codec, &subject)?;
            println!("Generated session: {}", report.token);
            println!("Recovered Data: {}", report.recovered);
            match report.tamper_error {
                Some(err) => println!("Error trying to read invalid session: {err}"),
                None => println!("Invalid session was valid?"),
            }
        }
        Command::Issue { subject } => {
            let output = commands::issue(&codec, subject.as_deref());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Verify { token } => {
            let output = commands::verify(&codec, &token);
            println!("{}", serde_json::to_string_pretty(&output)?);
            if !output.valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
