use super::*;

#[test]
fn success_stops_thread() {
    instruction_stops! {
        irq!(SUCCESS), SUCCESS
    };
}

#[test]
fn yield_stops_thread() {
    instruction_stops! {
        irq!(YIELD), YIELD
    };
}

#[test]
fn failure_stops_thread() {
    instruction_stops! {
        irq!(FAILURE), FAILURE
    };
}

#[test]
fn undefined_kind_stops_as_failure() {
    // Opcode 7, zero A field, kind 5, interrupt tail.
    instruction_stops! {
        0b1110_0010_1000_0001, FAILURE
    };
}

#[test]
fn word_encodings() {
    assert_eq!(irq!(SUCCESS), 0xE001);
    assert_eq!(irq!(YIELD), 0xE081);
    assert_eq!(irq!(FAILURE), 0xE101);
}

#[test]
fn done_thread_never_ticks_again() {
    let image = image_from_words(&[irq!(FAILURE), nop!()]);
    let mut memory = Memory::new();
    memory.load_image(constants::OUTPUT_BASE, &image[..]);

    let mut processor = Processor::new(constants::OUTPUT_BASE);

    assert_eq!(processor.tick(&mut memory), Some(Interrupt::FAILURE));
    assert_eq!(processor.tick(&mut memory), Some(Interrupt::FAILURE));
    assert_eq!(processor.program_counter(), constants::OUTPUT_BASE);
}
