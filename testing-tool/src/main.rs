use anyhow::{anyhow, Context, Result};
use colored::*;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{self, Write};

/// Respuesta de /auth/login
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: Value,
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "📦 Sort Dashboard Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("DASHBOARD_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let http = reqwest::Client::new();

    check_health(&http, &base_url).await?;

    // Paso 1: Pedir credenciales y autenticarse
    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;
    let client = login(http, base_url, &username, &password).await?;

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🎞️ Vista del día por belt");
        println!("2. 🌴 Necesidades de cobertura");
        println!("3. 🚚 Camiones y asignaciones a spots");
        println!("4. 📋 Briefing del día");
        println!("5. 🚪 Salir");

        let choice = prompt("Selecciona una opción (1-5): ")?;
        let result = match choice.as_str() {
            "1" => {
                let date = prompt("Fecha (YYYY-MM-DD): ")?;
                client.show("/belts/assignments", &[("date", date.as_str())]).await
            }
            "2" => {
                let date = prompt("Fecha (YYYY-MM-DD): ")?;
                client.show("/timeoff/coverage-needs", &[("date", date.as_str())]).await
            }
            "3" => {
                let date = prompt("Fecha (YYYY-MM-DD): ")?;
                match client.show("/trucks", &[]).await {
                    Ok(()) => client.show("/trucks/spot-assignments", &[("date", date.as_str())]).await,
                    Err(e) => Err(e),
                }
            }
            "4" => {
                let date = prompt("Fecha (YYYY-MM-DD): ")?;
                client.show("/briefing", &[("date", date.as_str())]).await
            }
            "5" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

async fn check_health(http: &reqwest::Client, base_url: &str) -> Result<()> {
    let response = http
        .get(format!("{}/health", base_url))
        .send()
        .await
        .with_context(|| format!("No se pudo conectar a {}", base_url))?;

    if !response.status().is_success() {
        return Err(anyhow!("Health check falló con status {}", response.status()));
    }

    println!("{} {}", "✅ Servidor disponible en".bright_green(), base_url);
    println!();
    Ok(())
}

async fn login(http: reqwest::Client, base_url: String, username: &str, password: &str) -> Result<ApiClient> {
    println!();
    println!("{}", "🔐 AUTENTICANDO...".bright_cyan().bold());

    let response = http
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body: Value = response.json().await.unwrap_or(Value::Null);
        return Err(anyhow!("Login falló ({}): {}", status, body["message"]));
    }

    let login: LoginResponse = response.json().await?;
    println!(
        "{} {} ({})",
        "✅ Sesión iniciada como".bright_green(),
        login.user["name"].as_str().unwrap_or(username),
        login.user["access_level"].as_str().unwrap_or("?")
    );

    Ok(ApiClient {
        http,
        base_url,
        token: login.token,
    })
}

impl ApiClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(anyhow!("{} -> {}: {}", path, status, body["message"]));
        }

        Ok(body)
    }

    async fn show(&self, path: &str, query: &[(&str, &str)]) -> Result<()> {
        let body = self.get(path, query).await?;

        println!();
        println!("{} {}", "📥 GET".bright_blue().bold(), path);
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }
}
