#![no_main]

use std::sync::mpsc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

use ember_descriptor::{convert_with, ArgsAndReturnType, RenderOptions, TypeModel};
use libfuzzer_sys::fuzz_target;

mod utils;

const TIMEOUT: Duration = Duration::from_secs(1);

struct Runner {
    input_tx: mpsc::SyncSender<String>,
    output_rx: Mutex<mpsc::Receiver<()>>,
}

fn run_one(text: &str) {
    // Goal: never panic / never hang on malformed input.
    if let Ok(ty) = TypeModel::parse(text) {
        assert_eq!(ty.descriptor(), text, "field descriptor must reconstruct");
        let _ = ty.object_class_name();
        let _ = ty.mangled_class_name();
    }
    if let Ok(parsed) = ArgsAndReturnType::parse(text) {
        for (idx, arg) in parsed.args().iter().enumerate() {
            assert_eq!(arg.position(), idx, "argument positions must be dense");
        }
    }
    let options = RenderOptions::default().with_insert("x");
    let _ = convert_with(text, &options);
}

fn runner() -> &'static Runner {
    static RUNNER: OnceLock<Runner> = OnceLock::new();
    RUNNER.get_or_init(|| {
        let (input_tx, input_rx) = mpsc::sync_channel::<String>(0);
        let (output_tx, output_rx) = mpsc::sync_channel::<()>(0);

        std::thread::spawn(move || {
            for input in input_rx {
                run_one(&input);
                let _ = output_tx.send(());
            }
        });

        Runner {
            input_tx,
            output_rx: Mutex::new(output_rx),
        }
    })
}

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::truncate_utf8(data) else {
        return;
    };

    let runner = runner();
    runner
        .input_tx
        .send(text.to_string())
        .expect("fuzz_descriptor worker thread exited");

    match runner
        .output_rx
        .lock()
        .expect("fuzz_descriptor worker receiver poisoned")
        .recv_timeout(TIMEOUT)
    {
        Ok(()) => {}
        Err(mpsc::RecvTimeoutError::Timeout) => panic!("fuzz_descriptor fuzz target timed out"),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            panic!("fuzz_descriptor worker thread panicked")
        }
    }
});
