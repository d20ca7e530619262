use crate::assembler::{Assembler, Label};
use crate::int_util::{process_int, to_i16, to_u16};
use crate::{new_parser_error, Result, Rule};
use dvm::{Interrupt, Opcode, ParseEnumError, RegisterId};
use matches::debug_assert_matches;
use pest::iterators::Pair;
use std::collections::HashMap;
use std::str::FromStr;

type LabelMap<'i> = HashMap<&'i str, Label>;

fn process_enum<T: FromStr<Err = ParseEnumError>>(pair: &Pair<Rule>) -> Result<T> {
    pair.as_str()
        .to_uppercase()
        .parse()
        .map_err(|err: ParseEnumError| new_parser_error(pair.as_span(), format!("{}", err)))
}

fn process_register(pair: Pair<Rule>) -> Result<RegisterId> {
    debug_assert_matches!(pair.as_rule(), Rule::register);
    process_enum(&pair.into_inner().next().unwrap())
}

fn label_for<'i>(labels: &mut LabelMap<'i>, assembler: &mut Assembler, name: &'i str) -> Label {
    *labels
        .entry(name)
        .or_insert_with(|| assembler.create_label())
}

fn process_instruction<'i>(
    pair: Pair<'i, Rule>,
    assembler: &mut Assembler,
    labels: &mut LabelMap<'i>,
) -> Result<()> {
    debug_assert_matches!(pair.as_rule(), Rule::instruction);
    let inner = pair.into_inner().next().unwrap();
    let rule = inner.as_rule();
    let span = inner.as_span();
    let mut pairs = inner.into_inner();

    match rule {
        Rule::instruction_rrr => {
            let opcode: Opcode = process_enum(&pairs.next().unwrap())?;
            let a = process_register(pairs.next().unwrap())?;
            let b = process_register(pairs.next().unwrap())?;
            let c = process_register(pairs.next().unwrap())?;
            match opcode {
                Opcode::ADD => assembler.add(a, b, c),
                Opcode::NAND => assembler.nand(a, b, c),
                _ => unreachable!(),
            }
        }
        Rule::instruction_rri => {
            let opcode: Opcode = process_enum(&pairs.next().unwrap())?;
            let a = process_register(pairs.next().unwrap())?;
            let b = process_register(pairs.next().unwrap())?;
            let int = pairs.next().unwrap();
            let int_span = int.as_span();
            let immediate = to_i16(int_span, process_int(int)?)?;
            match opcode {
                Opcode::ADDI => assembler.addi(a, b, immediate),
                Opcode::SW => assembler.sw(a, b, immediate),
                Opcode::LW => assembler.lw(a, b, immediate),
                Opcode::BEQ => assembler.beq(a, b, immediate),
                _ => unreachable!(),
            }
            .map_err(|err| new_parser_error(span, format!("{}", err)))?;
        }
        Rule::instruction_lui => {
            let a = process_register(pairs.next().unwrap())?;
            let int = pairs.next().unwrap();
            let int_span = int.as_span();
            let immediate = to_u16(int_span, process_int(int)?)?;
            assembler
                .lui(a, immediate)
                .map_err(|err| new_parser_error(span, format!("{}", err)))?;
        }
        Rule::instruction_jalr => {
            let a = process_register(pairs.next().unwrap())?;
            let b = process_register(pairs.next().unwrap())?;
            assembler.jalr(a, b);
        }
        Rule::instruction_irq => {
            let kind: Interrupt = process_enum(&pairs.next().unwrap())?;
            assembler.irq(kind);
        }
        Rule::instruction_movi => {
            let a = process_register(pairs.next().unwrap())?;
            let int = pairs.next().unwrap();
            let int_span = int.as_span();
            let value = to_u16(int_span, process_int(int)?)?;
            assembler.movi(a, value);
        }
        Rule::instruction_nop => {
            assembler.nop();
        }
        Rule::instruction_jmp => {
            let name = pairs.next().unwrap().as_str();
            let label = label_for(labels, assembler, name);
            assembler
                .jmp(label)
                .map_err(|err| new_parser_error(span, format!("{}", err)))?;
        }
        Rule::instruction_farjmp => {
            let register = process_register(pairs.next().unwrap())?;
            let name = pairs.next().unwrap().as_str();
            let label = label_for(labels, assembler, name);
            assembler.farjmp(register, label);
        }
        _ => unreachable!(),
    }

    Ok(())
}

pub fn process_program(pair: Pair<Rule>, assembler: &mut Assembler) -> Result<()> {
    debug_assert_matches!(pair.as_rule(), Rule::program);
    let mut labels = LabelMap::new();

    for statement in pair.into_inner() {
        if statement.as_rule() == Rule::EOI {
            continue;
        }
        debug_assert_matches!(statement.as_rule(), Rule::statement);
        let inner = statement.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::label => {
                let span = inner.as_span();
                let name = inner.into_inner().next().unwrap().as_str();
                let label = label_for(&mut labels, assembler, name);
                assembler
                    .bind(label)
                    .map_err(|err| new_parser_error(span, format!("{}", err)))?;
            }
            Rule::instruction => process_instruction(inner, assembler, &mut labels)?,
            _ => unreachable!(),
        }
    }

    Ok(())
}
