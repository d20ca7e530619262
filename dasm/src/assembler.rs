use crate::error::AssembleError;
use dvm::constants;
use dvm::{
    image_from_words, make_irq_instruction, make_jalr_instruction, make_ri_instruction,
    make_rri_instruction, make_rrr_instruction, Immediate, Interrupt, Opcode, RegisterId, Word,
};
use std::mem;

/// Handle to a symbolic jump target created by
/// [`Assembler::create_label`](struct.Assembler.html#method.create_label).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Label(usize);

#[derive(Debug, Default)]
struct LabelEntry {
    target: Option<Word>,
    // Word offsets of reserved one-word short jumps.
    jumps: Vec<usize>,
    // Word offsets of reserved three-word far jumps, with the scratch
    // register each one travels through.
    far_jumps: Vec<(usize, RegisterId)>,
}

/// Streaming instruction encoder.
///
/// Instructions are appended in source order into an arena of words; labels
/// live in a side table that records the patch sites waiting on them.
/// Binding a label overwrites the reserved words in place, so jumps may
/// reference labels bound either earlier or later. [`finish`] renders the
/// big-endian image and diagnoses every label still unbound.
///
/// The `origin` is the word address the script will be loaded at; it anchors
/// the absolute addresses far jumps load and the deltas short jumps encode.
///
/// [`finish`]: #method.finish
pub struct Assembler {
    origin: Word,
    words: Vec<Word>,
    labels: Vec<LabelEntry>,
}

fn check_imm7(immediate: i16) -> Result<Immediate, AssembleError> {
    if immediate < constants::IMM7_MIN || immediate > constants::IMM7_MAX {
        Err(AssembleError::ImmediateRange(i32::from(immediate)))
    } else {
        Ok(immediate as Immediate)
    }
}

fn short_delta(site_pc: Word, target: Word) -> Result<Immediate, AssembleError> {
    let distance = i32::from(target) - (i32::from(site_pc) + 1);
    if distance < i32::from(constants::IMM7_MIN) || distance > i32::from(constants::IMM7_MAX) {
        Err(AssembleError::JumpOutOfRange(distance))
    } else {
        Ok(distance as Immediate)
    }
}

// The lui/addi pair that materializes an absolute address in a register.
fn far_words(register: RegisterId, target: Word) -> [Word; 2] {
    [
        make_ri_instruction(Opcode::LUI, register, target >> constants::LUI_SHIFT),
        make_rri_instruction(
            Opcode::ADDI,
            register,
            register,
            (target & constants::IMM6_MASK) as Immediate,
        ),
    ]
}

impl Assembler {
    pub fn new() -> Assembler {
        Assembler::with_origin(constants::OUTPUT_BASE)
    }

    pub fn with_origin(origin: Word) -> Assembler {
        Assembler {
            origin,
            words: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn origin(&self) -> Word {
        self.origin
    }

    /// Program counter of the next instruction to be emitted.
    pub fn pc(&self) -> Word {
        self.origin.wrapping_add(self.words.len() as Word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words[..]
    }

    fn push(&mut self, word: Word) {
        self.words.push(word);
    }

    pub fn add(&mut self, a: RegisterId, b: RegisterId, c: RegisterId) {
        self.push(make_rrr_instruction(Opcode::ADD, a, b, c));
    }

    pub fn nand(&mut self, a: RegisterId, b: RegisterId, c: RegisterId) {
        self.push(make_rrr_instruction(Opcode::NAND, a, b, c));
    }

    pub fn addi(
        &mut self,
        a: RegisterId,
        b: RegisterId,
        immediate: i16,
    ) -> Result<(), AssembleError> {
        let immediate = check_imm7(immediate)?;
        self.push(make_rri_instruction(Opcode::ADDI, a, b, immediate));
        Ok(())
    }

    pub fn sw(
        &mut self,
        a: RegisterId,
        b: RegisterId,
        immediate: i16,
    ) -> Result<(), AssembleError> {
        let immediate = check_imm7(immediate)?;
        self.push(make_rri_instruction(Opcode::SW, a, b, immediate));
        Ok(())
    }

    pub fn lw(
        &mut self,
        a: RegisterId,
        b: RegisterId,
        immediate: i16,
    ) -> Result<(), AssembleError> {
        let immediate = check_imm7(immediate)?;
        self.push(make_rri_instruction(Opcode::LW, a, b, immediate));
        Ok(())
    }

    pub fn beq(
        &mut self,
        a: RegisterId,
        b: RegisterId,
        immediate: i16,
    ) -> Result<(), AssembleError> {
        let immediate = check_imm7(immediate)?;
        self.push(make_rri_instruction(Opcode::BEQ, a, b, immediate));
        Ok(())
    }

    pub fn lui(&mut self, a: RegisterId, immediate: u16) -> Result<(), AssembleError> {
        if immediate > constants::IMM10_MAX {
            return Err(AssembleError::WideImmediateRange(u32::from(immediate)));
        }
        self.push(make_ri_instruction(Opcode::LUI, a, immediate));
        Ok(())
    }

    pub fn jalr(&mut self, a: RegisterId, b: RegisterId) {
        self.push(make_jalr_instruction(a, b));
    }

    pub fn irq(&mut self, kind: Interrupt) {
        self.push(make_irq_instruction(kind));
    }

    /// Loads a full 16-bit constant: `lui` for the top ten bits, `addi` for
    /// the bottom six. Always two words, never out of range.
    pub fn movi(&mut self, a: RegisterId, value: Word) {
        self.push(make_ri_instruction(
            Opcode::LUI,
            a,
            value >> constants::LUI_SHIFT,
        ));
        self.push(make_rri_instruction(
            Opcode::ADDI,
            a,
            a,
            (value & constants::IMM6_MASK) as Immediate,
        ));
    }

    pub fn nop(&mut self) {
        self.add(RegisterId::ZERO, RegisterId::ZERO, RegisterId::ZERO);
    }

    /// Creates a fresh, unbound label.
    pub fn create_label(&mut self) -> Label {
        self.labels.push(LabelEntry::default());
        Label(self.labels.len() - 1)
    }

    /// Emits a one-word branch (`beq $r0, $r0, delta`) to the label. If the
    /// label is still unbound the word is reserved and patched at bind time.
    pub fn jmp(&mut self, label: Label) -> Result<(), AssembleError> {
        match self.labels[label.0].target {
            Some(target) => {
                let delta = short_delta(self.pc(), target)?;
                self.push(make_rri_instruction(
                    Opcode::BEQ,
                    RegisterId::ZERO,
                    RegisterId::ZERO,
                    delta,
                ));
            }
            None => {
                let site = self.words.len();
                self.push(nop_word());
                self.labels[label.0].jumps.push(site);
            }
        }
        Ok(())
    }

    /// Emits a three-word absolute jump: the label's address is materialized
    /// in `register`, then jumped through with `jalr $r0, register`.
    pub fn farjmp(&mut self, register: RegisterId, label: Label) {
        match self.labels[label.0].target {
            Some(target) => {
                let [high, low] = far_words(register, target);
                self.push(high);
                self.push(low);
            }
            None => {
                let site = self.words.len();
                self.push(nop_word());
                self.push(nop_word());
                self.labels[label.0].far_jumps.push((site, register));
            }
        }
        self.jalr(RegisterId::ZERO, register);
    }

    /// Binds the label to the current program counter and patches every
    /// pending jump registered against it.
    pub fn bind(&mut self, label: Label) -> Result<(), AssembleError> {
        let target = self.pc();

        let (jumps, far_jumps) = {
            let entry = &mut self.labels[label.0];
            if entry.target.is_some() {
                return Err(AssembleError::LabelRebound(label.0));
            }
            entry.target = Some(target);
            (
                mem::replace(&mut entry.jumps, Vec::new()),
                mem::replace(&mut entry.far_jumps, Vec::new()),
            )
        };

        for site in jumps {
            let site_pc = self.origin.wrapping_add(site as Word);
            let delta = short_delta(site_pc, target)?;
            self.words[site] = make_rri_instruction(
                Opcode::BEQ,
                RegisterId::ZERO,
                RegisterId::ZERO,
                delta,
            );
        }

        for (site, register) in far_jumps {
            let [high, low] = far_words(register, target);
            self.words[site] = high;
            self.words[site + 1] = low;
        }

        Ok(())
    }

    /// Renders the big-endian script image. Labels that still have pending
    /// jumps, and scripts that outgrow their memory region, are diagnosed
    /// here rather than silently emitted.
    pub fn finish(self) -> Result<Vec<u8>, AssembleError> {
        for (index, entry) in self.labels.iter().enumerate() {
            if entry.target.is_none() && !(entry.jumps.is_empty() && entry.far_jumps.is_empty()) {
                return Err(AssembleError::UnboundLabel(index));
            }
        }
        if self.words.len() > constants::SCRIPT_WORDS_MAX {
            return Err(AssembleError::ProgramTooLong(self.words.len()));
        }
        Ok(image_from_words(&self.words))
    }
}

impl Default for Assembler {
    fn default() -> Assembler {
        Assembler::new()
    }
}

fn nop_word() -> Word {
    make_rrr_instruction(
        Opcode::ADD,
        RegisterId::ZERO,
        RegisterId::ZERO,
        RegisterId::ZERO,
    )
}
