use std::time::{SystemTime, UNIX_EPOCH};

use everest_api::{ApiResponse, EverestClient, EverestClientBuilder};
use serde_json::{Value, json};

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

fn error_text(response: &ApiResponse) -> String {
    response
        .error_message()
        .map(|message| message.into_owned())
        .unwrap_or_else(|| format!("HTTP {}", response.status_code()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // EVEREST_BASE_URL, EVEREST_CLIENT_ID, EVEREST_CLIENT_SECRET are required;
    // EVEREST_DEBUG=1 dumps traffic (run with RUST_LOG=everest_api::debug=info).
    let mut client: EverestClient = EverestClientBuilder::from_env()?.build()?;

    println!("1. Authenticating...");
    // The token can be cached and handed back through EVEREST_TOKEN or set_token.
    if client.token().is_none() {
        let auth = client.auth()?;
        if !auth.is_success() {
            println!("authentication failed: {}", error_text(&auth));
            return Ok(());
        }
    }
    let token = client.token().unwrap_or_default();
    println!("token: {}...", token.chars().take(20).collect::<String>());

    println!("2. Listing services...");
    let services = client.post("/services", &())?;
    if services.is_success() {
        let list = services
            .data()
            .and_then(|data| data["services"].as_array())
            .cloned()
            .unwrap_or_default();
        println!("found {} services", list.len());
        if let Some(first) = list.first() {
            println!("example: service #{} - {}", first["id"], first["name"]);
        }
    } else {
        println!("failed to get services: {}", error_text(&services));
    }

    println!("3. Checking address coverage...");
    let check = client.post(
        "/is-handled-address",
        &json!({
            "address": "18 Boulevard des Batignolles, 75017 Paris",
            "start_date": now() + 3600,
            "service_id": 2,
        }),
    )?;
    if check.is_success() {
        let data = check.data().cloned().unwrap_or(Value::Null);
        if data["success"].as_bool().unwrap_or(false) {
            println!("address is handled, price: {} EUR", data["price"]["total_ttc"]);
        } else {
            println!("address is not handled");
        }
    } else {
        println!("failed to check address: {}", error_text(&check));
    }

    println!("4. Creating a mission...");
    let stamp = now();
    let created = client.post(
        "/missions/create",
        &json!({
            "start_date": stamp + 7200,
            "service_id": 2,
            "client_ref": format!("TEST-{stamp}"),
            "comment": "API client test mission",
            "address_start": "18 Boulevard des Batignolles, 75017 Paris",
            "address_start_name": "Sender Name",
            "address_start_email": "sender@test.com",
            "address_start_tel": "0123456789",
            "address_end": "55 Rue du Faubourg Saint-Honoré, 75008 Paris",
            "address_end_name": "John Doe",
            "address_end_tel": "0666666666",
            "address_end_email": "johndoe@email.tld",
            "address_end_comment": "Code 2850 apt 108",
            "packages": [{
                "name": "Test Package",
                "weight": 0.5,
                "length": 34,
                "width": 26,
                "depth": 3.25,
                "ref": format!("PKG-{stamp}"),
                "quantity": 1,
            }],
            "custom_infos": [{
                "name": "Test Info",
                "value": format!("Test Value {stamp}"),
            }],
        }),
    )?;

    let mission_ref = if created.is_success() {
        let reference = created
            .data()
            .and_then(|data| data["mission"]["ref"].as_str())
            .map(str::to_owned);
        if let Some(reference) = &reference {
            println!("mission created: {reference}");
        }
        reference
    } else {
        println!("failed to create mission: {}", error_text(&created));
        None
    };

    if let Some(reference) = mission_ref {
        println!("5. Fetching mission {reference}...");
        let mission = client.post("/missions/get", &json!({"ref": reference}))?;
        if mission.is_success() {
            let data = mission.data().cloned().unwrap_or(Value::Null);
            println!("status: {}", data["mission"]["status"]);
            println!("from: {}", data["mission"]["address_start"]);
            println!("to: {}", data["mission"]["address_end"]);
        } else {
            println!("failed to get mission: {}", error_text(&mission));
        }

        println!("6. Updating mission...");
        let updated = client.post(
            "/missions/update",
            &json!({
                "ref": reference,
                "address_end_comment": format!("Updated by API client test at {}", now()),
            }),
        )?;
        if updated.is_success() {
            println!("mission updated");
        } else {
            println!("failed to update mission: {}", error_text(&updated));
        }

        println!("7. Canceling mission...");
        let canceled = client.post("/missions/cancel", &json!({"ref": reference}))?;
        if canceled.is_success() {
            println!("mission canceled");
        } else {
            println!("failed to cancel mission: {}", error_text(&canceled));
        }
    }

    println!("8. Listing recent missions...");
    let missions = client.post("/missions", &json!({"limit_start": 0, "limit_end": 50}))?;
    if missions.is_success() {
        let list = missions
            .data()
            .and_then(|data| data["missions"].as_array())
            .cloned()
            .unwrap_or_default();
        println!("retrieved {} recent missions", list.len());
        for (idx, mission) in list.iter().take(3).enumerate() {
            println!("{}. {} - status: {}", idx + 1, mission["ref"], mission["status"]);
        }
    } else {
        println!("failed to list missions: {}", error_text(&missions));
    }

    println!("9. Fetching account information...");
    let account = client.post("/me", &())?;
    if account.is_success() {
        let data = account.data().cloned().unwrap_or(Value::Null);
        println!("platform: {}", data["platform"]["name"]);
        println!("client: {}", data["client"]["name"]);
        log::debug!("account snapshot: {:?}", account.to_structured());
    } else {
        println!("failed to get account info: {}", error_text(&account));
    }

    Ok(())
}
