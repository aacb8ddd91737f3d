use nrfjprog_errors::{error_message, BindingErrorCode, NrfjprogError};

fn main() {
    println!("--- JSON Export Example ---\n");

    let err = error_message(
        BindingErrorCode::CouldNotRead.value(),
        "reading 16 bytes at 0x20000000",
        "",
        NrfjprogError::RamIsOffError.value(),
    );

    // The object an embedding layer hands to the scripting callback
    match err.map(|e| serde_json::to_string_pretty(&e)) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => eprintln!("serialization failed: {e}"),
        None => println!("null"),
    }
}
