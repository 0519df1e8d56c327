use tally::host::stdio::StdHost;
use tally::runtime::built_ins;
use tally::runtime::data_structures::value::Value;
use tally::runtime::interpreter::machine::Machine;

fn machine() -> Machine {
    let mut m = Machine::new(Box::new(StdHost::new(vec!["tally".to_string()])));
    built_ins::register_all(&mut m);
    m
}

/// A full program, rather than a single word, exercises file I/O against the real filesystem
/// through `StdHost` (spec.md section 6.1).
#[test]
fn a_script_can_write_then_read_back_a_file() {
    let mut m = machine();
    let path = std::env::temp_dir().join(format!("tally-integration-{}.txt", std::process::id()));
    let path = path.to_str().unwrap();

    let program = format!("\"{path}\" \"line one\\nline two\" writef \"{path}\" readf \",\" \"-\" split", path = path);
    m.eval_source("<test>", &program).unwrap();

    std::fs::remove_file(path).ok();

    // "," doesn't occur in the file contents, so split on it is a no-op wrapping the whole text.
    match m.pop().unwrap() {
        Value::Quote(values) => assert_eq!(values.as_ref(), &[Value::String("line one\nline two".to_string())]),
        other => panic!("expected a quote, got {:?}", other),
    }
}

#[test]
fn appendf_accumulates_across_calls_on_disk() {
    let mut m = machine();
    let path = std::env::temp_dir().join(format!("tally-integration-append-{}.txt", std::process::id()));
    let path = path.to_str().unwrap();
    std::fs::remove_file(path).ok();

    let program = format!("\"{path}\" \"a\" appendf \"{path}\" \"b\" appendf \"{path}\" readf", path = path);
    m.eval_source("<test>", &program).unwrap();

    std::fs::remove_file(path).ok();
    assert_eq!(m.pop().unwrap(), Value::String("ab".to_string()));
}

/// Spawning a real child process via `exec` (spec.md's `spawn` host hook).
#[test]
fn exec_spawns_a_real_process_and_captures_its_output() {
    let mut m = machine();
    let program = if cfg!(windows) {
        "[ \"cmd\" \"/C\" \"echo hello\" ] exec"
    } else {
        "[ \"echo\" \"hello\" ] exec"
    };

    m.eval_source("<test>", program).unwrap();
    let exit_code = m.pop().unwrap();
    let _stderr = m.pop().unwrap();
    let stdout = m.pop().unwrap();

    assert_eq!(exit_code, Value::Int(0));
    assert!(stdout.into_string().unwrap().contains("hello"));
}

/// A program spanning definitions, higher-order iteration, and arithmetic together, the way a
/// real `.tally` script would read.
#[test]
fn a_multi_word_program_composes_correctly() {
    let mut m = machine();
    m.eval_source(
        "<test>",
        "[ dup * ] \\square def! [ 1 2 3 4 ] [ square ] map [ 10 gt? ] filter",
    )
    .unwrap();

    match m.pop().unwrap() {
        Value::Quote(values) => assert_eq!(values.as_ref(), &[Value::Int(16)]),
        other => panic!("expected a quote, got {:?}", other),
    }
}
