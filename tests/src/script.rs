use slam_lib::script::{parse, run, ScriptError};
use slam_lib::{Host, Slam, SlamConfig};

fn run_script(config: SlamConfig, text: &str) -> Result<String, ScriptError> {
    let lines = parse(text)?;
    let mut host = Host::new(Slam::new(config));
    let mut out = Vec::new();
    run(&mut host, &lines, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[test]
fn movement_scenario() {
    let out = run_script(SlamConfig::movement(), r#"
        reset
        write 0x04 1

        move east 5
        wait 2
        expect pos 5 0
        expect out 0x05

        move north 3
        wait 2
        expect pos 5 3
        expect out 0x35
        expect irq off

        write 0x00 0x0400   # east 1024
        wait 2
        expect irq on
        irq
        write 0x10 1
        wait 1
        expect irq off
        irq
    "#).unwrap();
    assert_eq!(out, "irq: on\nirq: off\n");
}

#[test]
fn spike_scenario() {
    let out = run_script(SlamConfig::spike(), r#"
        reset
        write 4 1
        spike east 0x20
        wait 2
        expect pos 0x20 0
        spike north 0x30
        wait 2
        expect pos 0x20 0x30
        spike east 0xffff
        wait 2
        expect irq on
        read 8
        out
        writeb 0x10 1
        expect irq off
    "#).unwrap();
    assert_eq!(out, "0x08: 0x0030001f\nout: 0x0f\n");
}

#[test]
fn expectation_mismatch() {
    let err = run_script(SlamConfig::movement(), "reset\nwrite 4 1\nmove east 5\nexpect pos 5 0\n")
        .unwrap_err();
    // Read samples before the commit edge.
    match err {
        ScriptError::Expectation { line, expected, actual } => {
            assert_eq!(line, 4);
            assert_eq!(expected, "Position { x: 5, y: 0 }");
            assert_eq!(actual, "Position { x: 0, y: 0 }");
        }
        e => panic!("unexpected error {e}"),
    }
}

#[test]
fn error_display() {
    let err = parse("reset\nmove sideways 3\n").unwrap_err();
    assert_eq!(err.to_string(), "Line 2: unknown direction \"sideways\"");

    let err = run_script(SlamConfig::movement(), "write 8 1").unwrap_err();
    assert_eq!(err.to_string(), "Line 1: Register at 0x08 is read-only");
}
