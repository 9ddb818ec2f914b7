//! Log in with the username-password flow and walk through the REST wrappers.
//!
//! Required environment variables:
//! - SF_CLIENT_ID, SF_CLIENT_SECRET (connected app)
//! - SF_USERNAME, SF_PASSWORD
//!
//! Optional:
//! - SF_SECURITY_TOKEN
//! - SF_AUTH_URL (use https://test.salesforce.com/services/oauth2/token for sandboxes)
//!
//! Run with: RUST_LOG=info cargo run --example query_accounts

use salesforce_rest::client::security::soql;
use salesforce_rest::{AuthConfig, Authenticator, PasswordAuth, SalesforceRest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let auth = PasswordAuth::new(AuthConfig::from_env()?)?;
    let sf = SalesforceRest::new(auth)?;

    println!("=== Salesforce REST walkthrough ===\n");

    let instance_url = sf.auth().instance_url().await?;
    println!("Logged in to {}\n", instance_url);

    let fields = sf.field_names("Account").await?;
    println!("Account has {} fields", fields.len());

    let wanted = ["Id", "Name", "Industry"];
    let select = soql::build_safe_select(&wanted).ok_or("no safe fields")?;
    let accounts = sf
        .query_all(&format!("SELECT {} FROM Account ORDER BY Name LIMIT 5", select))
        .await?;
    for account in &accounts {
        println!("  {} {}", account["Id"], account["Name"]);
    }
    println!();

    let name = "Demo Account (salesforce-rest)";
    let id = sf
        .create("Account", &serde_json::json!({ "Name": name }))
        .await?;
    println!("Created {}", id);

    sf.update(
        "Account",
        &id,
        &serde_json::json!({ "Description": "Updated by the demo" }),
    )
    .await?;
    println!("Updated {}", id);

    let found = sf
        .query(&format!(
            "SELECT Id FROM Account WHERE Name = '{}'",
            soql::escape_string(name)
        ))
        .await?;
    println!("Query by name found {} record(s)", found.total_size);

    sf.delete("Account", &id).await?;
    println!("Deleted {}", id);

    let views = sf.list_views("Account").await?;
    for view in &views.listviews {
        println!("  list view {} ({})", view.label, view.developer_name);
    }

    Ok(())
}
