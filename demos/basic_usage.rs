use nrfjprog_errors::{check, BindingErrorCode, NrfjprogError, Result};

/// Stand-in for `NRFJPROG_connect_to_emu_with_snr`.
fn connect_to_emu(serial: u32) -> i32 {
    if serial == 0 {
        NrfjprogError::NoEmulatorConnected.value()
    } else {
        NrfjprogError::Success.value()
    }
}

fn open_device(serial: u32) -> Result<()> {
    let lowlevel = connect_to_emu(serial);
    let errno = if lowlevel == 0 {
        BindingErrorCode::Success
    } else {
        BindingErrorCode::CouldNotOpenDevice
    };

    check(errno.value(), format!("opening device {serial}"), "", lowlevel)
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    match open_device(0) {
        Ok(()) => println!("Connected"),
        Err(err) => {
            // What the caller prints
            println!("1. [MESSAGE]");
            println!("{err}\n");

            // What a script inspects
            println!("2. [FIELDS]");
            println!("   errno:           {}", err.errno());
            println!("   errcode:         {}", err.errcode());
            println!("   erroperation:    {}", err.operation());
            println!("   lowlevelErrorNo: {}", err.lowlevel_errno());
            println!("   lowlevelError:   {}", err.lowlevel_error());

            // What goes to the log file
            println!("\n3. [LOG LINE]");
            err.with_log_entry(|log| println!("   {log}"));
        }
    }
}
