/// Size of one fixed-point scalar on the wire (firmware `int`, 16 bits).
pub const SCALAR_SIZE: usize = 2;
/// Size of one three-axis field.
pub const VECTOR3_SIZE: usize = SCALAR_SIZE * 3;
/// Size of one packet with the frame terminator stripped.
pub const PACKET_SIZE: usize = VECTOR3_SIZE * 4 + SCALAR_SIZE;

/// Divisor applied to the raw `i16` to recover the reading.
pub const FIXED_POINT_SCALE: f64 = 100.0;
/// Byte the firmware writes after every packet.
pub const FRAME_TERMINATOR: u8 = b'\n';

/// Named field of a sensor packet, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Acceleration,
    Gyro,
    Magnetic,
    Orientation,
    Temperature,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Acceleration,
        Field::Gyro,
        Field::Magnetic,
        Field::Orientation,
        Field::Temperature,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Field::Acceleration => "acceleration",
            Field::Gyro => "gyro",
            Field::Magnetic => "magnetic",
            Field::Orientation => "orientation",
            Field::Temperature => "temperature",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Byte span of this field within a packet.
    pub const fn span(self) -> FieldSpan {
        LAYOUT[self as usize].1
    }
}

/// Offset and length of a field within a packet buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub offset: usize,
    pub size: usize,
}

impl FieldSpan {
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    pub const fn end(self) -> usize {
        self.offset + self.size
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.offset..self.end()
    }
}

pub const ACCELERATION: FieldSpan = FieldSpan::new(0, VECTOR3_SIZE);
pub const GYRO: FieldSpan = FieldSpan::new(VECTOR3_SIZE, VECTOR3_SIZE);
pub const MAGNETIC: FieldSpan = FieldSpan::new(VECTOR3_SIZE * 2, VECTOR3_SIZE);
pub const ORIENTATION: FieldSpan = FieldSpan::new(VECTOR3_SIZE * 3, VECTOR3_SIZE);
pub const TEMPERATURE: FieldSpan = FieldSpan::new(VECTOR3_SIZE * 4, SCALAR_SIZE);

/// Packet schema, indexed by `Field` discriminant.
pub const LAYOUT: [(Field, FieldSpan); 5] = [
    (Field::Acceleration, ACCELERATION),
    (Field::Gyro, GYRO),
    (Field::Magnetic, MAGNETIC),
    (Field::Orientation, ORIENTATION),
    (Field::Temperature, TEMPERATURE),
];

const fn layout_is_consistent() -> bool {
    let mut cursor = 0;
    let mut i = 0;
    while i < LAYOUT.len() {
        let (field, span) = LAYOUT[i];
        if field as usize != i || span.offset != cursor || span.end() > PACKET_SIZE {
            return false;
        }
        let expected = match field {
            Field::Temperature => SCALAR_SIZE,
            _ => VECTOR3_SIZE,
        };
        if span.size != expected {
            return false;
        }
        cursor = span.end();
        i += 1;
    }
    cursor == PACKET_SIZE
}

const _: () = assert!(layout_is_consistent(), "packet layout does not tile PACKET_SIZE");
