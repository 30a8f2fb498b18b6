use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use form_store::config::StoreConfig;
use form_store::error::{CodecError, Result};
use form_store::prelude::{DocumentCodec, FormStore, YamlCodec};

/// 管理保存在多个目录中的表单定义
#[derive(Parser)]
#[command(name = "form-store", version)]
struct Cli {
    /// 配置文件路径（缺省读取 FORM_STORE_CONFIG 或 ./form-store.yaml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 列出所有启用的表单
    List {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 以 YAML 输出表单内容
    Show { id: String },
    /// 判断表单文件是否存在（存在退出码 0，否则 1）
    Exists { id: String },
    /// 从 YAML 文件读取表单并保存
    Save {
        id: String,
        #[arg(long, short)]
        file: PathBuf,
    },
    /// 删除表单文件
    Delete { id: String },
    /// 列出保存目录
    Paths,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "form_store=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("错误[{}]: {}", e.code(), e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = StoreConfig::discover(cli.config.as_deref())?;
    let store = FormStore::open(config.settings())?;

    match cli.command {
        Command::List { json } => {
            let forms = store.list_forms()?;
            if json {
                let out = serde_json::to_string_pretty(&forms)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
                println!("{}", out);
                return Ok(ExitCode::SUCCESS);
            }
            if forms.is_empty() {
                println!("（没有表单）");
            }
            for form in forms {
                println!(
                    "{:<24} {:<32} {}",
                    form.identifier, form.name, form.persistence_identifier
                );
            }
        }
        Command::Show { id } => {
            let form = store.load(&id)?;
            let bytes = YamlCodec.encode(&form)?;
            print!("{}", String::from_utf8_lossy(&bytes));
        }
        Command::Exists { id } => {
            let exists = store.exists(&id)?;
            println!("{}", exists);
            if !exists {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Save { id, file } => {
            let raw = std::fs::read(&file)?;
            let form = YamlCodec.decode(&raw).map_err(|e| e.at(&file))?;
            store.save(&id, &form)?;
            println!("已保存 '{}' → {}", id, store.resolve_path(&id)?.display());
        }
        Command::Delete { id } => {
            if store.delete(&id)? {
                println!("已删除 '{}'", id);
            } else {
                println!("'{}' 不存在", id);
            }
        }
        Command::Paths => {
            for save_path in store.save_paths() {
                let flag = if save_path.enabled { "启用" } else { "禁用" };
                println!("{}  {}", flag, save_path.path.display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
