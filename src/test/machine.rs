use super::*;

const ZERO_HASH: [u8; 32] = [0; 32];

fn run_job(output: &[Word], input: &[Word]) -> bool {
    verify(
        &ZERO_HASH,
        &image_from_words(output),
        &image_from_words(input),
    )
    .unwrap()
}

// An output script that spins until the input script raises a flag at word
// 0x1000, then claims success. Outlives the pre-run budget by construction.
fn flag_watcher() -> Vec<Word> {
    vec![
        instr_ri!(LUI, R2, 0x40),
        instr_rri!(LW, R1, R2, 0),
        instr_rri!(BEQ, R1, ZERO, -2),
        irq!(SUCCESS),
    ]
}

fn flag_raiser() -> Vec<Word> {
    vec![
        instr_rri!(ADDI, R1, ZERO, 1),
        instr_ri!(LUI, R2, 0x40),
        instr_rri!(SW, R1, R2, 0),
        instr_rri!(BEQ, ZERO, ZERO, -1),
    ]
}

#[test]
fn immediate_success() {
    assert!(run_job(&[irq!(SUCCESS)], &[]));
}

#[test]
fn immediate_failure() {
    assert!(!run_job(&[irq!(FAILURE)], &[]));
}

#[test]
fn yield_is_not_a_win() {
    let mut machine =
        Machine::new(&ZERO_HASH, &image_from_words(&[irq!(YIELD), irq!(SUCCESS)])).unwrap();

    assert_eq!(machine.run(&[]).unwrap(), false);
    assert_eq!(machine.output_thread().state(), Some(Interrupt::YIELD));
    assert_eq!(machine.ticks(), 1);
}

#[test]
fn prerun_success_never_loads_input() {
    let output = image_from_words(&[irq!(SUCCESS)]);
    let input = image_from_words(&[irq!(FAILURE)]);
    let mut machine = Machine::new(&ZERO_HASH, &output).unwrap();

    assert_eq!(machine.run(&input).unwrap(), true);
    assert_eq!(machine.ticks(), 1);
    assert_eq!(machine.memory().read(constants::INPUT_BASE), 0);
    assert_eq!(machine.input_thread().state(), None);
}

#[test]
fn tick_exhaustion_loses() {
    let output = image_from_words(&[instr_rri!(BEQ, ZERO, ZERO, -1)]);
    let mut machine = Machine::new(&ZERO_HASH, &output).unwrap();

    assert_eq!(machine.run(&[]).unwrap(), false);
    assert_eq!(machine.output_thread().state(), None);
    // Full pre-run budget, then a full co-run budget for each thread.
    assert_eq!(
        machine.ticks(),
        constants::MAX_INIT_TICKS + 2 * constants::MAX_TICKS
    );
}

#[test]
fn spender_unlocks_watcher() {
    assert!(run_job(&flag_watcher(), &flag_raiser()));
}

#[test]
fn watcher_without_spender_exhausts() {
    assert!(!run_job(&flag_watcher(), &[]));
}

#[test]
fn verdict_is_deterministic() {
    let output = image_from_words(&flag_watcher());
    let input = image_from_words(&flag_raiser());

    let mut first = Machine::new(&ZERO_HASH, &output).unwrap();
    let mut second = Machine::new(&ZERO_HASH, &output).unwrap();

    assert_eq!(first.run(&input).unwrap(), second.run(&input).unwrap());
    assert_eq!(first.ticks(), second.ticks());
}

#[test]
fn hash_image_is_loaded_big_endian() {
    let mut hash = [0u8; 32];
    for (i, byte) in hash.iter_mut().enumerate() {
        *byte = i as u8;
    }

    let machine = Machine::new(&hash, &[]).unwrap();

    assert_eq!(machine.memory().read(0), 0x0001);
    assert_eq!(machine.memory().read(15), 0x1E1F);
    assert_eq!(machine.memory().read(16), 0);
}

#[test]
fn bad_hash_rejected() {
    assert_eq!(
        Machine::new(&[0u8; 31], &[]).err(),
        Some(Error::HashLength(31))
    );
}

#[test]
fn oversized_output_rejected() {
    let output = vec![0u8; constants::SCRIPT_BYTES_MAX + 1];
    assert_eq!(
        Machine::new(&ZERO_HASH, &output).err(),
        Some(Error::ScriptLength(constants::SCRIPT_BYTES_MAX + 1))
    );
}

#[test]
fn oversized_input_rejected() {
    let output = image_from_words(&flag_watcher());
    let input = vec![0u8; constants::SCRIPT_BYTES_MAX + 1];
    let mut machine = Machine::new(&ZERO_HASH, &output).unwrap();

    assert_eq!(
        machine.run(&input).err(),
        Some(Error::ScriptLength(constants::SCRIPT_BYTES_MAX + 1))
    );
}
