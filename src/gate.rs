use crate::pin::{Pin, Pins};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum GateType {
    And,
    Or,
    Not,
    Xor,
    Nand,
    Nor,
    Xnor,
    Buffer,
}

impl GateType {
    pub fn is_unary(self) -> bool {
        matches!(self, GateType::Not | GateType::Buffer)
    }

    pub fn label(self) -> &'static str {
        match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Not => "NOT",
            GateType::Xor => "XOR",
            GateType::Nand => "NAND",
            GateType::Nor => "NOR",
            GateType::Xnor => "XNOR",
            GateType::Buffer => "BUF",
        }
    }

    /// Apply the gate function to the input levels.
    ///
    /// ```text
    /// AND  = all        (empty -> 0)     NAND = !AND  (empty -> 1)
    /// OR   = any        (empty -> 0)     NOR  = !OR   (empty -> 1)
    /// XOR  = odd parity (empty -> 0)     XNOR = !XOR  (empty -> 1)
    /// NOT  = !in0       (empty -> 1)     BUF  = in0   (empty -> 0)
    /// ```
    pub fn apply(self, inputs: &[bool]) -> bool {
        let parity = inputs.iter().filter(|&&x| x).count() % 2 == 1;
        match self {
            GateType::And => !inputs.is_empty() && inputs.iter().all(|&x| x),
            GateType::Or => inputs.iter().any(|&x| x),
            GateType::Nand => !(!inputs.is_empty() && inputs.iter().all(|&x| x)),
            GateType::Nor => !inputs.iter().any(|&x| x),
            GateType::Xor => parity,
            GateType::Xnor => !parity,
            GateType::Not => inputs.first().map_or(true, |&x| !x),
            GateType::Buffer => inputs.first().copied().unwrap_or(false),
        }
    }
}

/// A combinational gate with `num_inputs` pins named `in0..` and one `out`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Gate {
    pub ty: GateType,
    num_inputs: usize,
}

// Constructors
impl Gate {
    pub fn new(ty: GateType, num_inputs: usize) -> Gate {
        let num_inputs = if ty.is_unary() { 1 } else { num_inputs };
        Gate { ty, num_inputs }
    }

    pub fn and(num_inputs: usize) -> Gate {
        Gate::new(GateType::And, num_inputs)
    }

    pub fn or(num_inputs: usize) -> Gate {
        Gate::new(GateType::Or, num_inputs)
    }

    pub fn not() -> Gate {
        Gate::new(GateType::Not, 1)
    }

    pub fn buffer() -> Gate {
        Gate::new(GateType::Buffer, 1)
    }
}

// Getters
impl Gate {
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn input_name(index: usize) -> String {
        format!("in{}", index)
    }
}

impl Gate {
    pub fn pins(&self) -> Pins {
        let n = self.num_inputs;
        let mut pins: Pins = (0..n)
            .map(|i| {
                let y = if n > 1 { 10.0 + (i as f64) * 20.0 } else { 20.0 };
                Pin::input(Gate::input_name(i), 0.0, y)
            })
            .collect();
        pins.add(Pin::output("out", 60.0, 20.0));
        pins
    }

    pub fn evaluate(&self, pins: &mut Pins) {
        let inputs: Vec<bool> = (0..self.num_inputs)
            .map(|i| pins.high(&Gate::input_name(i)))
            .collect();
        pins.drive("out", self.ty.apply(&inputs));
    }
}
