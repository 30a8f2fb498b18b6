//! demo01_basic.rs —— 多目录表单存储演示
//!
//! ```text
//! 1. 两个保存目录：primary 启用，archive 禁用
//! 2. 保存两个表单，列出摘要
//! 3. 通过 disabledForms 隐藏其中一个
//! ```
//!
//! # 运行
//! ```bash
//! cargo run --example demo01_basic
//! ```

use form_store::prelude::*;

fn main() -> form_store::error::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "form_store=debug".into()),
        )
        .init();

    let root = std::env::temp_dir().join("form-store-demo");
    let config = StoreConfig::from_yaml_str(&format!(
        r#"
forms:
  savePaths:
    {root}/primary: true
    {root}/archive: false
  disabledForms:
    survey: true
"#,
        root = root.display()
    ))?;

    let store = FormStore::open(config.settings())?;

    store.save(
        "contact",
        &FormDefinition::new("contact").with_label("联系表单"),
    )?;
    store.save("survey-2024", &FormDefinition::new("survey"))?;

    println!("保存目录:");
    for save_path in store.save_paths() {
        println!("  {} (enabled = {})", save_path.path.display(), save_path.enabled);
    }

    println!("\n表单列表（survey 已禁用）:");
    for form in store.list_forms()? {
        println!(
            "  {:<12} {:<12} {}",
            form.identifier, form.name, form.persistence_identifier
        );
    }

    // 禁用只影响列表，按文件名仍可读取
    let survey = store.load("survey-2024")?;
    println!("\n直接读取 survey-2024: identifier = {}", survey.identifier);

    Ok(())
}
