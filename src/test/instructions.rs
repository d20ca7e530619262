use super::*;

macro_rules! instruction_executes {
    (
        $instr:expr,
        [$($id:ident = $v:expr),*] => [$($eid:ident = $ev:expr),*],
        [$(($maddr:expr, $mv:expr)),*] => [$(($emaddr:expr, $emv:expr)),*],
        $state:expr,
        $pc:expr
    ) => {{
        // ----- PREPARE -----
        // 1. Load the instruction (padded with a nop) at the output base.
        let image = image_from_words(&[$instr, nop!()]);
        let mut memory = Memory::new();
        memory.load_image(constants::OUTPUT_BASE, &image[..]);

        // 2. Seed memory words.
        $(
            memory.write($maddr, $mv);
        )*

        // 3. Set initial register values (unspecified values stay 0).
        let mut processor = Processor::new(constants::OUTPUT_BASE);
        $(
            processor.set_register(RegisterId::$id, $v);
        )*

        // 4. Expected register values: same as the initial ones unless
        //    explicitly overridden.
        let mut expected = *processor.registers();
        $(
            expected.set(RegisterId::$eid, $ev);
        )*

        // ----- ACT -----
        processor.tick(&mut memory);

        // ----- ASSERT -----
        assert_eq!($state, processor.state(), "Final state does not match!");
        assert_eq!(
            $pc,
            processor.program_counter(),
            "Final program counter does not match!"
        );
        assert_eq!(
            &expected,
            processor.registers(),
            "Final register values do not match!"
        );
        $(
            assert_eq!(
                $emv,
                memory.read($emaddr),
                "Final value of memory word {:#06X} does not match!",
                $emaddr
            );
        )*
    }};
}

macro_rules! instruction_runs {
    (
        $instr:expr,
        [$($id:ident = $v:expr),*] => [$($eid:ident = $ev:expr),*],
        [$($m:tt)*] => [$($em:tt)*]
    ) => {
        instruction_executes! {
            $instr,
            [$($id = $v),*] => [$($eid = $ev),*],
            [$($m)*] => [$($em)*],
            None,
            constants::OUTPUT_BASE + 1
        }
    };
    (
        $instr:expr,
        [$($id:ident = $v:expr),*] => [$($eid:ident = $ev:expr),*]
    ) => {
        instruction_runs! {
            $instr,
            [$($id = $v),*] => [$($eid = $ev),*],
            [] => []
        }
    };
}

macro_rules! instruction_jumps {
    (
        $instr:expr,
        [$($id:ident = $v:expr),*] => [$($eid:ident = $ev:expr),*],
        $pc:expr
    ) => {
        instruction_executes! {
            $instr,
            [$($id = $v),*] => [$($eid = $ev),*],
            [] => [],
            None,
            $pc
        }
    };
}

macro_rules! instruction_stops {
    ( $instr:expr, $kind:ident ) => {
        instruction_executes! {
            $instr,
            [] => [],
            [] => [],
            Some(Interrupt::$kind),
            constants::OUTPUT_BASE
        }
    };
}

#[test]
fn nop_changes_nothing() {
    instruction_runs! {
        nop!(), [] => []
    };
}

#[test]
fn zero_register_read_only() {
    instruction_runs! {
        instr_rrr!(ADD, ZERO, R1, R2),
        [R1 = 0x1234, R2 = 0x4321] => []
    };
}

mod add;
mod addi;
mod beq;
mod irq;
mod jalr;
mod lui;
mod lw;
mod nand;
mod sw;
