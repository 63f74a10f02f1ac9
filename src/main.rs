use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use log::{debug, error};
use creato::catalogue::{CHANNEL_FORMATS, STYLE_VARIATIONS};
use creato::{Error, FeatureRequest, GatewayConfig, HttpGateway, Studio};

#[derive(Parser, Debug)]
#[command(name = "creato", version, about = "Structured creative generation")]
struct Cli
{   /// JSON gateway config; environment variables are used otherwise
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{   /// Run one feature request and print the JSON result
    Run
    {   /// Request file; stdin when omitted
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Print the channel catalogue
    Channels,
    /// Print the style catalogue
    Styles,
}

#[tokio::main]
async fn main() -> ExitCode
{   env_logger::init();
    let cli = Cli::parse();

    match execute(cli).await
    {   Ok(output) => {
          println!("{}", output);
          ExitCode::SUCCESS
        }
      , Err(e) => {
          error!("{}", e);
          eprintln!("error [{}]: {}", e.kind(), e);
          ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<String, Error>
{   match cli.command
    {   Commands::Channels => pretty(&CHANNEL_FORMATS)
      , Commands::Styles => pretty(&STYLE_VARIATIONS)
      , Commands::Run { input } => {
          let config = match &cli.config
          {   Some(path) => GatewayConfig::load(path)?
            , None => GatewayConfig::from_env()
          };
          let request = read_request(input.as_ref())?;
          debug!("Request parsed");
          let chat_model = config.chat_model.clone();
          let studio = Studio::new(HttpGateway::new(config), chat_model);
          let result = studio.run(&request).await?;
          pretty(&result)
        }
    }
}

fn read_request(input: Option<&PathBuf>) -> Result<FeatureRequest, Error>
{   let text = match input
    {   Some(path) => std::fs::read_to_string(path).map_err(|e| {
          Error::InvalidRequest(format!("read {}: {}", path.display(), e))
        })?
      , None => {
          let mut buf = String::new();
          std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            Error::InvalidRequest(format!("read stdin: {}", e))
          })?;
          buf
        }
    };
    serde_json::from_str(&text)
      .map_err(|e| Error::InvalidRequest(e.to_string()))
}

fn pretty<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, Error>
{   serde_json::to_string_pretty(value)
      .map_err(|e| Error::Serialization(e.to_string()))
}
