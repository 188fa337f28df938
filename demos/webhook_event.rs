use std::io::{self, Read};

use everest_api::MissionStatusEvent;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut payload = String::new();
    io::stdin().read_to_string(&mut payload)?;

    let event = MissionStatusEvent::from_json(&payload)?;
    println!(
        "event: {}, mission: {}, status: {}, date: {}",
        event.event,
        event.reference,
        event.status,
        event.date.value()
    );

    if event.is_completed() {
        println!(
            "mission {} completed by {} at {}",
            event.reference,
            event.agent_name,
            event.date.value()
        );
    }
    for media in &event.medias {
        match media.as_str().or_else(|| media["url"].as_str()) {
            Some(url) => println!("media: {url}"),
            None => println!("media: {media}"),
        }
    }
    if let Some((lat, lon)) = event.coordinates() {
        println!("location: {lat}, {lon}");
    }
    for field in &event.extras_fields {
        println!("extra field: {field}");
    }

    Ok(())
}
