//! Stack-layout planner (§ frame layout): assigns every non-`Unit`-typed
//! value in a function a unique 4-byte stack slot before codegen walks
//! the function body.

use std::collections::HashMap;

use koopa::ir::{FunctionData, Value};

pub struct FrameLayout {
    offsets: HashMap<Value, usize>,
    pub frame_size: usize,
}

impl FrameLayout {
    pub fn build(func_data: &FunctionData) -> Self {
        let mut offsets = HashMap::new();
        let mut next_offset = 0usize;

        for (_bb, node) in func_data.layout().bbs() {
            for &inst in node.insts().keys() {
                let data = func_data.dfg().value(inst);
                if !data.ty().is_unit() {
                    offsets.insert(inst, next_offset);
                    next_offset += 4;
                }
            }
        }

        let frame_size = align16(next_offset);
        FrameLayout {
            offsets,
            frame_size,
        }
    }

    pub fn offset_of(&self, value: Value) -> usize {
        *self
            .offsets
            .get(&value)
            .expect("every non-unit value must have a stack slot")
    }
}

fn align16(size: usize) -> usize {
    (size + 15) / 16 * 16
}
