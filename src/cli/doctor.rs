//! Doctor command - check optional readers and services

use crate::config::Settings;
use crate::extract::Capabilities;

pub fn run(settings: &Settings) {
    println!("docaudit doctor\n");

    let caps = Capabilities::probe(Some(settings.languagetool_url.as_str()));
    for (label, ok, remediation) in caps.rows() {
        if ok {
            println!("✓ {label}: OK");
        } else {
            println!("○ {label}: not available");
            println!("  {remediation}");
        }
    }
    println!("  LanguageTool URL: {}", settings.languagetool_url);

    if caps.rows().iter().all(|(_, ok, _)| *ok) {
        println!("\nAll checks passed!");
    } else {
        println!("\nMissing pieces only disable the matching readers or checks.");
    }
}
