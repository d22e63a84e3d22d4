//! Command tables for the two modes.
//!
//! A grid cell is a command when its code point decodes in the current
//! mode's table. Terrain (`/ \ _ |`), spaces and every other glyph are
//! skipped by the movement engine at no tick cost.

use crate::mode::Mode;

/// Commands with the same meaning in both modes. Pops and pushes still
/// follow the current mode's coercion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharedOp {
    /// `@` — stop the program.
    Terminate,
    /// `"` — start capturing a string literal.
    StringMode,
    /// `'` — step onto the next cell and push it verbatim.
    Escape,
    /// `#` — skip the next command.
    Skip,
    /// `.` — duplicate the top value.
    Duplicate,
    /// `;` — discard the top value without coercion.
    Discard,
    /// `~` — swap the top two values.
    Swap,
    /// `Q` — pop a count, then re-push that many values in coerced form.
    Convert,
    /// `&` — queue a repetition for the next command.
    Iterate,
    /// `w` — push the IP onto the return stack.
    PushReturn,
    /// `W` — drop the top return address.
    DropReturn,
    /// `k` — pop a return address and jump there.
    Return,
    /// `K` — jump to the top return address, keeping it.
    ReturnKeep,
}

/// All shared commands.
pub const ALL_SHARED_OPS: [SharedOp; 13] = [
    SharedOp::Terminate,
    SharedOp::StringMode,
    SharedOp::Escape,
    SharedOp::Skip,
    SharedOp::Duplicate,
    SharedOp::Discard,
    SharedOp::Swap,
    SharedOp::Convert,
    SharedOp::Iterate,
    SharedOp::PushReturn,
    SharedOp::DropReturn,
    SharedOp::Return,
    SharedOp::ReturnKeep,
];

impl SharedOp {
    pub fn decode(c: char) -> Option<Self> {
        Some(match c {
            '@' => SharedOp::Terminate,
            '"' => SharedOp::StringMode,
            '\'' => SharedOp::Escape,
            '#' => SharedOp::Skip,
            '.' => SharedOp::Duplicate,
            ';' => SharedOp::Discard,
            '~' => SharedOp::Swap,
            'Q' => SharedOp::Convert,
            '&' => SharedOp::Iterate,
            'w' => SharedOp::PushReturn,
            'W' => SharedOp::DropReturn,
            'k' => SharedOp::Return,
            'K' => SharedOp::ReturnKeep,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        match self {
            SharedOp::Terminate => '@',
            SharedOp::StringMode => '"',
            SharedOp::Escape => '\'',
            SharedOp::Skip => '#',
            SharedOp::Duplicate => '.',
            SharedOp::Discard => ';',
            SharedOp::Swap => '~',
            SharedOp::Convert => 'Q',
            SharedOp::Iterate => '&',
            SharedOp::PushReturn => 'w',
            SharedOp::DropReturn => 'W',
            SharedOp::Return => 'k',
            SharedOp::ReturnKeep => 'K',
        }
    }
}

/// Cardinal (integer) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalOp {
    /// `0`–`9`
    Digit(u8),
    Add,
    Subtract,
    Multiply,
    /// `:` floored division.
    Divide,
    /// `%` floored modulo.
    Modulo,
    DivMod,
    FloorToMultiple,
    Increment,
    Decrement,
    Abs,
    Negate,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    /// `l`
    HighestBit,
    /// `u`
    FillBits,
    Power,
    Factorial,
    Binomial,
    /// `c`
    PrimeFactors,
    /// `f`
    FactorPairs,
    /// `D`
    Radical,
    /// `S`
    ReplaceDivisor,
    /// `B`
    Divisors,
    Gcd,
    Lcm,
    /// `F`
    Divides,
    /// `Z`
    Pack,
    /// `Y`
    Unpack,
    LogicalNot,
    /// `a` — push 10.
    Ten,
    /// `e` — push -1.
    MinusOne,
    /// `d`
    Depth,
    /// `,`
    Rotate,
    FaceWest,
    FaceEast,
    FaceNorth,
    FaceSouth,
    TurnLeft,
    TurnRight,
    /// `=`
    SignTurn,
    /// `$`
    SkipIfZero,
    /// `j` — jump to popped coordinates, pushing a return address.
    Call,
    /// `J` — jump to popped coordinates.
    Jump,
    /// `g`
    GetCell,
    /// `p`
    PutCell,
    /// `!`
    Store,
    /// `?`
    Fetch,
    /// `[`
    MemoryLeft,
    /// `]`
    MemoryRight,
    /// `(`
    SeekLeft,
    /// `)`
    SeekRight,
    /// `q`
    MemoryPointer,
    /// `i`
    ReadByte,
    /// `I`
    ReadChar,
    /// `o`
    WriteByte,
    /// `O`
    WriteChar,
    /// `` ` ``
    ArgCount,
    /// `U`
    Random,
    /// `T`
    Sleep,
}

/// All Cardinal commands.
pub const ALL_CARDINAL_OPS: [CardinalOp; 71] = [
    CardinalOp::Digit(0),
    CardinalOp::Digit(1),
    CardinalOp::Digit(2),
    CardinalOp::Digit(3),
    CardinalOp::Digit(4),
    CardinalOp::Digit(5),
    CardinalOp::Digit(6),
    CardinalOp::Digit(7),
    CardinalOp::Digit(8),
    CardinalOp::Digit(9),
    CardinalOp::Add,
    CardinalOp::Subtract,
    CardinalOp::Multiply,
    CardinalOp::Divide,
    CardinalOp::Modulo,
    CardinalOp::DivMod,
    CardinalOp::FloorToMultiple,
    CardinalOp::Increment,
    CardinalOp::Decrement,
    CardinalOp::Abs,
    CardinalOp::Negate,
    CardinalOp::BitAnd,
    CardinalOp::BitOr,
    CardinalOp::BitXor,
    CardinalOp::BitNot,
    CardinalOp::HighestBit,
    CardinalOp::FillBits,
    CardinalOp::Power,
    CardinalOp::Factorial,
    CardinalOp::Binomial,
    CardinalOp::PrimeFactors,
    CardinalOp::FactorPairs,
    CardinalOp::Radical,
    CardinalOp::ReplaceDivisor,
    CardinalOp::Divisors,
    CardinalOp::Gcd,
    CardinalOp::Lcm,
    CardinalOp::Divides,
    CardinalOp::Pack,
    CardinalOp::Unpack,
    CardinalOp::LogicalNot,
    CardinalOp::Ten,
    CardinalOp::MinusOne,
    CardinalOp::Depth,
    CardinalOp::Rotate,
    CardinalOp::FaceWest,
    CardinalOp::FaceEast,
    CardinalOp::FaceNorth,
    CardinalOp::FaceSouth,
    CardinalOp::TurnLeft,
    CardinalOp::TurnRight,
    CardinalOp::SignTurn,
    CardinalOp::SkipIfZero,
    CardinalOp::Call,
    CardinalOp::Jump,
    CardinalOp::GetCell,
    CardinalOp::PutCell,
    CardinalOp::Store,
    CardinalOp::Fetch,
    CardinalOp::MemoryLeft,
    CardinalOp::MemoryRight,
    CardinalOp::SeekLeft,
    CardinalOp::SeekRight,
    CardinalOp::MemoryPointer,
    CardinalOp::ReadByte,
    CardinalOp::ReadChar,
    CardinalOp::WriteByte,
    CardinalOp::WriteChar,
    CardinalOp::ArgCount,
    CardinalOp::Random,
    CardinalOp::Sleep,
];

impl CardinalOp {
    pub fn decode(c: char) -> Option<Self> {
        use CardinalOp::*;
        Some(match c {
            '0'..='9' => Digit(c as u8 - b'0'),
            '+' => Add,
            '-' => Subtract,
            '*' => Multiply,
            ':' => Divide,
            '%' => Modulo,
            'M' => DivMod,
            'm' => FloorToMultiple,
            'h' => Increment,
            't' => Decrement,
            'H' => Abs,
            'R' => Negate,
            'A' => BitAnd,
            'V' => BitOr,
            'X' => BitXor,
            'N' => BitNot,
            'l' => HighestBit,
            'u' => FillBits,
            'E' => Power,
            'P' => Factorial,
            'C' => Binomial,
            'c' => PrimeFactors,
            'f' => FactorPairs,
            'D' => Radical,
            'S' => ReplaceDivisor,
            'B' => Divisors,
            'G' => Gcd,
            'L' => Lcm,
            'F' => Divides,
            'Z' => Pack,
            'Y' => Unpack,
            'n' => LogicalNot,
            'a' => Ten,
            'e' => MinusOne,
            'd' => Depth,
            ',' => Rotate,
            '<' => FaceWest,
            '>' => FaceEast,
            '^' => FaceNorth,
            'v' => FaceSouth,
            '{' => TurnLeft,
            '}' => TurnRight,
            '=' => SignTurn,
            '$' => SkipIfZero,
            'j' => Call,
            'J' => Jump,
            'g' => GetCell,
            'p' => PutCell,
            '!' => Store,
            '?' => Fetch,
            '[' => MemoryLeft,
            ']' => MemoryRight,
            '(' => SeekLeft,
            ')' => SeekRight,
            'q' => MemoryPointer,
            'i' => ReadByte,
            'I' => ReadChar,
            'o' => WriteByte,
            'O' => WriteChar,
            '`' => ArgCount,
            'U' => Random,
            'T' => Sleep,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        use CardinalOp::*;
        match self {
            Digit(d) => (b'0' + d) as char,
            Add => '+',
            Subtract => '-',
            Multiply => '*',
            Divide => ':',
            Modulo => '%',
            DivMod => 'M',
            FloorToMultiple => 'm',
            Increment => 'h',
            Decrement => 't',
            Abs => 'H',
            Negate => 'R',
            BitAnd => 'A',
            BitOr => 'V',
            BitXor => 'X',
            BitNot => 'N',
            HighestBit => 'l',
            FillBits => 'u',
            Power => 'E',
            Factorial => 'P',
            Binomial => 'C',
            PrimeFactors => 'c',
            FactorPairs => 'f',
            Radical => 'D',
            ReplaceDivisor => 'S',
            Divisors => 'B',
            Gcd => 'G',
            Lcm => 'L',
            Divides => 'F',
            Pack => 'Z',
            Unpack => 'Y',
            LogicalNot => 'n',
            Ten => 'a',
            MinusOne => 'e',
            Depth => 'd',
            Rotate => ',',
            FaceWest => '<',
            FaceEast => '>',
            FaceNorth => '^',
            FaceSouth => 'v',
            TurnLeft => '{',
            TurnRight => '}',
            SignTurn => '=',
            SkipIfZero => '$',
            Call => 'j',
            Jump => 'J',
            GetCell => 'g',
            PutCell => 'p',
            Store => '!',
            Fetch => '?',
            MemoryLeft => '[',
            MemoryRight => ']',
            SeekLeft => '(',
            SeekRight => ')',
            MemoryPointer => 'q',
            ReadByte => 'i',
            ReadChar => 'I',
            WriteByte => 'o',
            WriteChar => 'O',
            ArgCount => '`',
            Random => 'U',
            Sleep => 'T',
        }
    }
}

/// Ordinal (string) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrdinalOp {
    /// `0`–`9` — append the digit.
    Digit(u8),
    Concat,
    /// `-` — delete the first occurrence.
    Remove,
    Riffle,
    /// `:` — occurrence count.
    Count,
    Split,
    /// `M`
    SplitInclusive,
    Find,
    Replace,
    Trim,
    /// `y`
    Transliterate,
    Intersection,
    Union,
    SymmetricDifference,
    Complement,
    Dedup,
    Sort,
    Shuffle,
    RandomChar,
    Lower,
    Upper,
    SwapCase,
    /// `f`
    Runs,
    Head,
    Tail,
    /// `c`
    Chars,
    Reverse,
    Permutations,
    Subsequences,
    Substrings,
    /// `x`
    Permute,
    /// `r`
    ExpandRanges,
    Zip,
    Unzip,
    /// `G`
    LongestCommonSubstring,
    /// `L`
    ShortestCommonSuperstring,
    /// `z`
    Transpose,
    EnsureWest,
    EnsureEast,
    EnsureNorth,
    EnsureSouth,
    StrafeLeft,
    StrafeRight,
    /// `=`
    Compare,
    /// `$`
    SkipIfEmpty,
    /// `j` — jump to a label, pushing a return address.
    Call,
    /// `J` — jump to a label.
    Jump,
    /// `g` — read the text following a label.
    GetLabel,
    /// `p` — write text following a label.
    PutLabel,
    /// `d`
    JoinStack,
    /// `q`
    ReverseStack,
    /// `,`
    PermuteStack,
    /// `!`
    WriteRegister,
    /// `?`
    ReadRegister,
    /// `[`
    PreviousRegister,
    /// `]`
    NextRegister,
    /// `i`
    ReadAll,
    /// `I`
    ReadLine,
    /// `o`
    Write,
    /// `O`
    WriteLine,
    /// `` ` ``
    NextArg,
    /// `n` — `"Jabberwocky"` for empty input, empty otherwise.
    LogicalNot,
    /// `a` — push a line feed.
    Newline,
    /// `e` — push the empty string.
    Empty,
    /// `T`
    Timestamp,
}

/// All Ordinal commands.
pub const ALL_ORDINAL_OPS: [OrdinalOp; 74] = [
    OrdinalOp::Digit(0),
    OrdinalOp::Digit(1),
    OrdinalOp::Digit(2),
    OrdinalOp::Digit(3),
    OrdinalOp::Digit(4),
    OrdinalOp::Digit(5),
    OrdinalOp::Digit(6),
    OrdinalOp::Digit(7),
    OrdinalOp::Digit(8),
    OrdinalOp::Digit(9),
    OrdinalOp::Concat,
    OrdinalOp::Remove,
    OrdinalOp::Riffle,
    OrdinalOp::Count,
    OrdinalOp::Split,
    OrdinalOp::SplitInclusive,
    OrdinalOp::Find,
    OrdinalOp::Replace,
    OrdinalOp::Trim,
    OrdinalOp::Transliterate,
    OrdinalOp::Intersection,
    OrdinalOp::Union,
    OrdinalOp::SymmetricDifference,
    OrdinalOp::Complement,
    OrdinalOp::Dedup,
    OrdinalOp::Sort,
    OrdinalOp::Shuffle,
    OrdinalOp::RandomChar,
    OrdinalOp::Lower,
    OrdinalOp::Upper,
    OrdinalOp::SwapCase,
    OrdinalOp::Runs,
    OrdinalOp::Head,
    OrdinalOp::Tail,
    OrdinalOp::Chars,
    OrdinalOp::Reverse,
    OrdinalOp::Permutations,
    OrdinalOp::Subsequences,
    OrdinalOp::Substrings,
    OrdinalOp::Permute,
    OrdinalOp::ExpandRanges,
    OrdinalOp::Zip,
    OrdinalOp::Unzip,
    OrdinalOp::LongestCommonSubstring,
    OrdinalOp::ShortestCommonSuperstring,
    OrdinalOp::Transpose,
    OrdinalOp::EnsureWest,
    OrdinalOp::EnsureEast,
    OrdinalOp::EnsureNorth,
    OrdinalOp::EnsureSouth,
    OrdinalOp::StrafeLeft,
    OrdinalOp::StrafeRight,
    OrdinalOp::Compare,
    OrdinalOp::SkipIfEmpty,
    OrdinalOp::Call,
    OrdinalOp::Jump,
    OrdinalOp::GetLabel,
    OrdinalOp::PutLabel,
    OrdinalOp::JoinStack,
    OrdinalOp::ReverseStack,
    OrdinalOp::PermuteStack,
    OrdinalOp::WriteRegister,
    OrdinalOp::ReadRegister,
    OrdinalOp::PreviousRegister,
    OrdinalOp::NextRegister,
    OrdinalOp::ReadAll,
    OrdinalOp::ReadLine,
    OrdinalOp::Write,
    OrdinalOp::WriteLine,
    OrdinalOp::NextArg,
    OrdinalOp::LogicalNot,
    OrdinalOp::Newline,
    OrdinalOp::Empty,
    OrdinalOp::Timestamp,
];

impl OrdinalOp {
    pub fn decode(c: char) -> Option<Self> {
        use OrdinalOp::*;
        Some(match c {
            '0'..='9' => Digit(c as u8 - b'0'),
            '+' => Concat,
            '-' => Remove,
            '*' => Riffle,
            ':' => Count,
            '%' => Split,
            'M' => SplitInclusive,
            'F' => Find,
            'S' => Replace,
            'H' => Trim,
            'y' => Transliterate,
            'A' => Intersection,
            'V' => Union,
            'X' => SymmetricDifference,
            'N' => Complement,
            'D' => Dedup,
            's' => Sort,
            'b' => Shuffle,
            'U' => RandomChar,
            'l' => Lower,
            'u' => Upper,
            'E' => SwapCase,
            'f' => Runs,
            'h' => Head,
            't' => Tail,
            'c' => Chars,
            'R' => Reverse,
            'P' => Permutations,
            'C' => Subsequences,
            'B' => Substrings,
            'x' => Permute,
            'r' => ExpandRanges,
            'Z' => Zip,
            'Y' => Unzip,
            'G' => LongestCommonSubstring,
            'L' => ShortestCommonSuperstring,
            'z' => Transpose,
            '<' => EnsureWest,
            '>' => EnsureEast,
            '^' => EnsureNorth,
            'v' => EnsureSouth,
            '{' => StrafeLeft,
            '}' => StrafeRight,
            '=' => Compare,
            '$' => SkipIfEmpty,
            'j' => Call,
            'J' => Jump,
            'g' => GetLabel,
            'p' => PutLabel,
            'd' => JoinStack,
            'q' => ReverseStack,
            ',' => PermuteStack,
            '!' => WriteRegister,
            '?' => ReadRegister,
            '[' => PreviousRegister,
            ']' => NextRegister,
            'i' => ReadAll,
            'I' => ReadLine,
            'o' => Write,
            'O' => WriteLine,
            '`' => NextArg,
            'n' => LogicalNot,
            'a' => Newline,
            'e' => Empty,
            'T' => Timestamp,
            _ => return None,
        })
    }

    pub fn glyph(self) -> char {
        use OrdinalOp::*;
        match self {
            Digit(d) => (b'0' + d) as char,
            Concat => '+',
            Remove => '-',
            Riffle => '*',
            Count => ':',
            Split => '%',
            SplitInclusive => 'M',
            Find => 'F',
            Replace => 'S',
            Trim => 'H',
            Transliterate => 'y',
            Intersection => 'A',
            Union => 'V',
            SymmetricDifference => 'X',
            Complement => 'N',
            Dedup => 'D',
            Sort => 's',
            Shuffle => 'b',
            RandomChar => 'U',
            Lower => 'l',
            Upper => 'u',
            SwapCase => 'E',
            Runs => 'f',
            Head => 'h',
            Tail => 't',
            Chars => 'c',
            Reverse => 'R',
            Permutations => 'P',
            Subsequences => 'C',
            Substrings => 'B',
            Permute => 'x',
            ExpandRanges => 'r',
            Zip => 'Z',
            Unzip => 'Y',
            LongestCommonSubstring => 'G',
            ShortestCommonSuperstring => 'L',
            Transpose => 'z',
            EnsureWest => '<',
            EnsureEast => '>',
            EnsureNorth => '^',
            EnsureSouth => 'v',
            StrafeLeft => '{',
            StrafeRight => '}',
            Compare => '=',
            SkipIfEmpty => '$',
            Call => 'j',
            Jump => 'J',
            GetLabel => 'g',
            PutLabel => 'p',
            JoinStack => 'd',
            ReverseStack => 'q',
            PermuteStack => ',',
            WriteRegister => '!',
            ReadRegister => '?',
            PreviousRegister => '[',
            NextRegister => ']',
            ReadAll => 'i',
            ReadLine => 'I',
            Write => 'o',
            WriteLine => 'O',
            NextArg => '`',
            LogicalNot => 'n',
            Newline => 'a',
            Empty => 'e',
            Timestamp => 'T',
        }
    }
}

/// A decoded command in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Shared(SharedOp),
    Cardinal(CardinalOp),
    Ordinal(OrdinalOp),
}

impl Command {
    /// Decode a grid cell in `mode`. Non-characters never decode.
    pub fn decode(cell: i64, mode: Mode) -> Option<Self> {
        let c = u32::try_from(cell).ok().and_then(char::from_u32)?;
        if let Some(op) = SharedOp::decode(c) {
            return Some(Command::Shared(op));
        }
        match mode {
            Mode::Cardinal => CardinalOp::decode(c).map(Command::Cardinal),
            Mode::Ordinal => OrdinalOp::decode(c).map(Command::Ordinal),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Command::Shared(op) => op.glyph(),
            Command::Cardinal(op) => op.glyph(),
            Command::Ordinal(op) => op.glyph(),
        }
    }
}
