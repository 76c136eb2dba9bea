//! Flattening of nested statements into the instruction stream.
//!
//! Each `while` becomes a `Loop` marker, its body in source order, then a
//! `LoopEnd` marker. Loop targets are linked once here so the executor never
//! has to scan for them.

use micro_types::ast::{Instruction, Stmt};

/// Flatten statements and resolve every loop's end marker.
pub fn lower(stmts: Vec<Stmt>) -> Vec<Instruction> {
    let mut program = Vec::new();
    flatten_into(stmts, &mut program);
    link_loops(&mut program);
    program
}

fn flatten_into(stmts: Vec<Stmt>, out: &mut Vec<Instruction>) {
    for stmt in stmts {
        match stmt {
            Stmt::While { condition, body } => {
                out.push(Instruction::Loop { condition, end: 0 });
                flatten_into(body, out);
                out.push(Instruction::LoopEnd);
            }
            Stmt::Assign { target, value } => out.push(Instruction::Assign { target, value }),
            Stmt::Write { args } => out.push(Instruction::Write { args }),
        }
    }
}

fn link_loops(program: &mut [Instruction]) {
    for at in 0..program.len() {
        if matches!(program[at], Instruction::Loop { .. }) {
            let target = find_loop_end(program, at);
            if let Instruction::Loop { end, .. } = &mut program[at] {
                *end = target;
            }
        }
    }
}

/// Find the `LoopEnd` matching the `Loop` at `at` by forward scan.
///
/// Depth starts at 1, each nested `Loop` raises it and each `LoopEnd`
/// lowers it; the match is where it returns to 0. Returns `program.len()`
/// if there is none.
pub fn find_loop_end(program: &[Instruction], at: usize) -> usize {
    let mut depth = 1usize;
    for (i, instruction) in program.iter().enumerate().skip(at + 1) {
        match instruction {
            Instruction::Loop { .. } => depth += 1,
            Instruction::LoopEnd => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    program.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_types::ast::Expr;

    fn assign(name: &str) -> Stmt {
        Stmt::Assign {
            target: name.into(),
            value: Expr::zero(),
        }
    }

    #[test]
    fn test_nested_loops_link_to_their_own_end() {
        let program = lower(vec![Stmt::While {
            condition: Expr::ident("a"),
            body: vec![
                assign("x"),
                Stmt::While {
                    condition: Expr::ident("b"),
                    body: vec![assign("y")],
                },
                assign("z"),
            ],
        }]);
        let names: Vec<_> = program.iter().map(Instruction::name).collect();
        assert_eq!(
            names,
            ["while", "assignment", "while", "assignment", "end-while", "assignment", "end-while"]
        );
        assert!(matches!(program[0], Instruction::Loop { end: 6, .. }));
        assert!(matches!(program[2], Instruction::Loop { end: 4, .. }));
    }

    #[test]
    fn test_unmatched_loop_points_past_the_end() {
        let program = vec![Instruction::Loop {
            condition: Expr::zero(),
            end: 0,
        }];
        assert_eq!(find_loop_end(&program, 0), 1);
    }
}
