use pretty_assertions::assert_eq;
use tiny_asm::{assemble_line, assemble_lines, assemble_str, AsmError, LineError, ProgramBuffer};

#[test]
fn worked_program() {
    let buf = assemble_lines(["MOVI 5", "ADD a,b", "IN c", "OUT d"]).unwrap();
    assert_eq!(buf.as_bytes(), &[0x05, 0x81, 0xC2, 0xC7]);
}

#[test]
fn blank_and_comment_lines_produce_nothing() {
    assert_eq!(assemble_line(""), Ok(None));
    assert_eq!(assemble_line("   \t"), Ok(None));
    assert_eq!(assemble_line("; just a comment"), Ok(None));
    assert_eq!(assemble_line("   ; indented comment"), Ok(None));
}

#[test]
fn trailing_comment_and_whitespace() {
    assert_eq!(assemble_line("  movi 10   ; load ten"), Ok(Some(0x0A)));
    assert_eq!(assemble_line("sub c , d;x"), Ok(Some(0x9B)));
    assert_eq!(assemble_line("Out\td"), Ok(Some(0xC7)));
}

#[test]
fn mnemonics_are_case_insensitive() {
    for line in ["MOVI 1", "movi 1", "MoVi 1"] {
        assert_eq!(assemble_line(line), Ok(Some(0x01)));
    }
    assert_eq!(assemble_line("div A_ignored, b"), Err(AsmError::InvalidRegister("A_ignored".into())));
    assert_eq!(assemble_line("div a, b"), Ok(Some(0xB1)));
}

#[test]
fn prefix_match_keeps_table_order() {
    // no separator needed after the mnemonic
    assert_eq!(assemble_line("MOVI42"), Ok(Some(42)));
    // "INC" resolves to IN with operand "C a", whose first letter is not a register
    assert_eq!(assemble_line("INC a"), Err(AsmError::InvalidRegister("C a".into())));
    // ... and lower-case operands after the prefix still work
    assert_eq!(assemble_line("INb"), Ok(Some(0xC1)));
    assert_eq!(assemble_line("OUTPUT a"), Err(AsmError::InvalidRegister("PUT a".into())));
}

#[test]
fn movi_operands() {
    assert_eq!(assemble_line("MOVI 0"), Ok(Some(0x00)));
    assert_eq!(assemble_line("MOVI 127"), Ok(Some(0x7F)));
    assert_eq!(assemble_line("MOVI #9"), Ok(Some(0x09)));
    assert_eq!(assemble_line("MOVI +3"), Ok(Some(0x03)));
    assert_eq!(assemble_line("MOVI 128"), Err(AsmError::InvalidOperand("128".into())));
    assert_eq!(assemble_line("MOVI -1"), Err(AsmError::InvalidOperand("-1".into())));
    assert_eq!(assemble_line("MOVI 5x"), Err(AsmError::InvalidOperand("5x".into())));
    assert_eq!(assemble_line("MOVI 0x10"), Err(AsmError::InvalidOperand("0x10".into())));
    // the immediate must be the whole operand text, commas included
    assert_eq!(assemble_line("MOVI 5,"), Err(AsmError::InvalidOperand("5,".into())));
    assert_eq!(assemble_line("MOVI ,5"), Err(AsmError::InvalidOperand(",5".into())));
    assert_eq!(assemble_line("MOVI 5,6"), Err(AsmError::InvalidOperand("5,6".into())));
    assert_eq!(assemble_line("MOVI 5 ; five"), Ok(Some(0x05)));
    assert_eq!(
        assemble_line("MOVI"),
        Err(AsmError::MissingOperand { mnemonic: "MOVI", expected: 1, found: 0 })
    );
}

#[test]
fn register_operands() {
    assert_eq!(
        assemble_line("ADD a"),
        Err(AsmError::MissingOperand { mnemonic: "ADD", expected: 2, found: 1 })
    );
    assert_eq!(
        assemble_line("MUL a,"),
        Err(AsmError::MissingOperand { mnemonic: "MUL", expected: 2, found: 1 })
    );
    assert_eq!(
        assemble_line("ADD a,b,c"),
        Err(AsmError::ExtraOperand { mnemonic: "ADD", expected: 2, found: 3 })
    );
    assert_eq!(assemble_line("ADD a,e"), Err(AsmError::InvalidRegister("e".into())));
    assert_eq!(assemble_line("ADD A,b"), Err(AsmError::InvalidRegister("A".into())));
    // only the first character of a register token is significant
    assert_eq!(assemble_line("ADD alpha, beta"), Ok(Some(0x81)));
    assert_eq!(
        assemble_line("OUT"),
        Err(AsmError::MissingOperand { mnemonic: "OUT", expected: 1, found: 0 })
    );
    assert_eq!(
        assemble_line("IN a, b"),
        Err(AsmError::ExtraOperand { mnemonic: "IN", expected: 1, found: 2 })
    );
    assert_eq!(assemble_line("IN z"), Err(AsmError::InvalidRegister("z".into())));
}

#[test]
fn unknown_instruction() {
    assert_eq!(assemble_line("NOP"), Err(AsmError::UnknownInstruction("NOP".into())));
    assert_eq!(assemble_line("  jmp 3 ; loop"), Err(AsmError::UnknownInstruction("jmp 3".into())));
}

#[test]
fn batch_reports_first_failing_line() {
    let src = "MOVI 1\n; comment\n\nADD a,b\nFOO\nMOVI 999\n";
    let err = assemble_str(src).unwrap_err();
    assert_eq!(
        err,
        LineError { line: 5, source: AsmError::UnknownInstruction("FOO".into()) }
    );
    assert_eq!(err.to_string(), "line 5: unknown instruction 'FOO'");
}

#[test]
fn batch_skips_blank_lines() {
    let src = "; tiny program\nMOVI 7\n\n  ADD b, a ; b += a\nOUT b\n";
    let buf = assemble_str(src).unwrap();
    assert_eq!(buf.as_bytes(), &[0x07, 0x84, 0xC5]);
}

#[test]
fn buffer_grows_past_initial_capacity() {
    let mut buf = ProgramBuffer::new();
    assert!(buf.is_empty());
    for i in 0..1000usize {
        let line = format!("MOVI {}", i % 128);
        assert_eq!(buf.assemble_line(&line), Ok(Some((i % 128) as u8)));
    }
    assert_eq!(assemble_line("; nothing"), Ok(None));
    assert_eq!(buf.len(), 1000);
    let bytes = buf.into_vec();
    assert!(bytes.iter().enumerate().all(|(i, &b)| b == (i % 128) as u8));
}
