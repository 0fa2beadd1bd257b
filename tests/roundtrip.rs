//! Round-trip, skip and truncation behaviour across both wire variants.

use std::io::{self, Cursor, Read};

use nbtio::{varint, Error, ErrorKind, Options, Reader, TagType, Writer};

const FIXED: [Options; 2] = [Options::big_endian(), Options::little_endian()];

fn all_options() -> [Options; 4] {
    [
        Options::big_endian(),
        Options::little_endian(),
        Options::big_endian().with_compact(true),
        Options::little_endian().with_compact(true),
    ]
}

/// A stream with no `Seek` impl that returns short reads.
struct Chunked<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.step).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn encode<F>(options: Options, f: F) -> Vec<u8>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> nbtio::Result<()>,
{
    let mut writer = Writer::new(Vec::new(), options);
    f(&mut writer).unwrap();
    writer.into_inner()
}

#[test]
fn test_fixed_width_integers_roundtrip() {
    let shorts = [0i16, 1, -1, i16::MIN, i16::MAX, 0x1234];
    let ints = [0i32, 1, -1, i32::MIN, i32::MAX, 0x1234_5678];
    let longs = [0i64, 1, -1, i64::MIN, i64::MAX, 0x0123_4567_89ab_cdef];

    for options in FIXED {
        let data = encode(options, |w| {
            for v in shorts {
                w.write_i16(v)?;
            }
            for v in ints {
                w.write_i32(v)?;
            }
            for v in longs {
                w.write_i64(v)?;
            }
            Ok(())
        });
        assert_eq!(data.len(), shorts.len() * 2 + ints.len() * 4 + longs.len() * 8);

        let mut reader = Reader::new(data.as_slice(), options);
        for v in shorts {
            assert_eq!(reader.read_i16().unwrap(), v);
        }
        for v in ints {
            assert_eq!(reader.read_i32().unwrap(), v);
        }
        for v in longs {
            assert_eq!(reader.read_i64().unwrap(), v);
        }
    }
}

#[test]
fn test_floats_roundtrip_bit_exact() {
    let singles = [
        0.0f32,
        -0.0,
        1.0,
        f32::MIN,
        f32::MAX,
        f32::MIN_POSITIVE,
        f32::from_bits(1),
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        f32::from_bits(0x7fc0_1234),
    ];
    let doubles = [
        0.0f64,
        -0.0,
        std::f64::consts::PI,
        f64::MIN,
        f64::MAX,
        f64::from_bits(1),
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        f64::from_bits(0xfff8_0000_0000_beef),
    ];

    for options in all_options() {
        let data = encode(options, |w| {
            for v in singles {
                w.write_f32(v)?;
            }
            for v in doubles {
                w.write_f64(v)?;
            }
            Ok(())
        });

        let mut reader = Reader::new(data.as_slice(), options);
        for v in singles {
            assert_eq!(reader.read_f32().unwrap().to_bits(), v.to_bits());
        }
        for v in doubles {
            assert_eq!(reader.read_f64().unwrap().to_bits(), v.to_bits());
        }
    }
}

#[test]
fn test_compact_i32_roundtrip() {
    let mut values = vec![0, 1, -1, 63, -64, 64, -65, 8191, -8192, i32::MIN, i32::MAX];
    values.extend((0..31).map(|k| 1i32 << k));
    values.extend((0..31).map(|k| -(1i32 << k)));

    for options in [
        Options::big_endian().with_compact(true),
        Options::little_endian().with_compact(true),
    ] {
        for &v in &values {
            let data = encode(options, |w| w.write_i32(v));
            let mut reader = Reader::new(data.as_slice(), options);
            assert_eq!(reader.read_i32().unwrap(), v);
            assert!(reader.read_u8().unwrap_err().is_eof());
        }
    }
}

#[test]
fn test_compact_i32_length_grows_with_magnitude() {
    let options = Options::big_endian().with_compact(true);
    let len = |v: i32| encode(options, |w| w.write_i32(v)).len();

    for v in -64..=63 {
        assert_eq!(len(v), 1, "value {v}");
    }
    assert_eq!(len(64), 2);
    assert_eq!(len(-65), 2);
    assert_eq!(len(i32::MAX), 5);
    assert_eq!(len(i32::MIN), 5);

    let mut previous = 0;
    for k in 0..31 {
        let positive = len(1 << k);
        let negative = len(-(1 << k));
        assert!(positive >= previous);
        assert!(negative >= previous);
        previous = positive.max(negative);
    }
}

#[test]
fn test_varint_rejects_too_many_groups() {
    let run32 = [0x80u8; varint::MAX_VARINT32_BYTES + 1];
    let err = varint::read_u32(&mut &run32[..]).unwrap_err();
    assert!(matches!(err, Error::VarintOverflow { max_bytes: 5 }));
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(varint::read_i32(&mut &run32[..]).is_err());

    let run64 = [0xffu8; varint::MAX_VARINT64_BYTES + 1];
    assert!(matches!(
        varint::read_u64(&mut &run64[..]),
        Err(Error::VarintOverflow { max_bytes: 10 })
    ));
    assert!(matches!(
        varint::read_i64(&mut &run64[..]),
        Err(Error::VarintOverflow { max_bytes: 10 })
    ));

    let mut reader = Reader::new(&run32[..], Options::little_endian().with_compact(true));
    assert!(matches!(
        reader.read_i32(),
        Err(Error::VarintOverflow { .. })
    ));
}

fn sample_strings() -> Vec<String> {
    let mut strings = vec![String::new(), "a".to_string()];
    // Around the reader's 64-byte and the writer's 256-byte buffers.
    for n in [62, 63, 64, 65, 253, 254, 255, 256, 257, 1000] {
        strings.push("x".repeat(n));
    }
    // Multi-byte code points at every alignment against the chunk size.
    for pad in 0..4 {
        strings.push(format!("{}{}", "a".repeat(pad), "€".repeat(120)));
        strings.push(format!("{}{}", "b".repeat(pad), "🦀".repeat(90)));
    }
    strings.push("é".repeat(16383) + "z");
    strings
}

#[test]
fn test_string_roundtrip() {
    for options in all_options() {
        let limit = if options.compact {
            nbtio::MAX_COMPACT_STRING_LENGTH
        } else {
            nbtio::MAX_STRING_LENGTH
        };
        for value in sample_strings().into_iter().filter(|s| s.len() <= limit) {
            let data = encode(options, |w| w.write_string(&value));
            let prefix = if options.compact { 1 } else { 2 };
            assert_eq!(data.len(), prefix + value.len());

            let mut reader = Reader::new(data.as_slice(), options);
            assert_eq!(reader.read_string().unwrap(), value);

            let mut reader = Reader::new(Chunked { data: &data, step: 3 }, options);
            assert_eq!(reader.read_string().unwrap(), value);
        }
    }
}

#[test]
fn test_string_limit() {
    let at_limit = "q".repeat(nbtio::MAX_STRING_LENGTH);
    let over_limit = "é".repeat(16384);
    assert_eq!(over_limit.len(), 32768);

    for options in FIXED {
        let mut writer = Writer::new(Vec::new(), options);
        writer.write_string(&at_limit).unwrap();
        let err = writer.write_string(&over_limit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert_eq!(writer.get_ref().len(), 2 + at_limit.len());
    }
}

#[test]
fn test_skip_string_matches_read_string() {
    for options in all_options() {
        let limit = if options.compact {
            nbtio::MAX_COMPACT_STRING_LENGTH
        } else {
            nbtio::MAX_STRING_LENGTH
        };
        for value in sample_strings().into_iter().filter(|s| s.len() <= limit) {
            let data = encode(options, |w| {
                w.write_string(&value)?;
                w.write_i32(-77_777)?;
                w.write_tag_type(TagType::End)
            });

            let mut read = Reader::new(data.as_slice(), options);
            read.read_string().unwrap();
            let after_read = read.read_i32().unwrap();

            let mut skipped = Reader::new(data.as_slice(), options);
            skipped.skip_string().unwrap();
            assert_eq!(skipped.read_i32().unwrap(), after_read);
            assert_eq!(skipped.read_tag_type().unwrap(), TagType::End);

            let mut seeking = Reader::new_seekable(Cursor::new(&data), options);
            seeking.skip_string().unwrap();
            assert_eq!(seeking.read_i32().unwrap(), after_read);
        }
    }
}

#[test]
fn test_skip_parity_seekable_and_sequential() {
    let data: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();

    for n in [0i64, 1, 7, 8191, 8192, 8193, 20_000, 49_999] {
        let mut sequential = Reader::new(Cursor::new(&data), Options::big_endian());
        let mut seeking = Reader::new_seekable(Cursor::new(&data), Options::big_endian());
        sequential.skip(n).unwrap();
        seeking.skip(n).unwrap();
        assert_eq!(sequential.get_ref().position(), n as u64);
        assert_eq!(seeking.get_ref().position(), n as u64);
        assert_eq!(sequential.read_u8().unwrap(), seeking.read_u8().unwrap());
    }

    let mut chunked = Reader::new(Chunked { data: &data, step: 1000 }, Options::big_endian());
    chunked.skip(30_000).unwrap();
    assert_eq!(chunked.read_u8().unwrap(), data[30_000]);
}

#[test]
fn test_skip_past_end() {
    let data = [1u8, 2, 3];
    let mut sequential = Reader::new(&data[..], Options::big_endian());
    assert!(sequential.skip(4).unwrap_err().is_eof());

    // A seek past the end succeeds; the next read reports the missing bytes.
    let mut seeking = Reader::new_seekable(Cursor::new(&data[..]), Options::big_endian());
    seeking.skip(4).unwrap();
    assert!(seeking.read_u8().unwrap_err().is_eof());
}

#[test]
fn test_negative_skip_is_contract_violation() {
    let mut reader = Reader::new_seekable(Cursor::new(vec![0u8; 4]), Options::big_endian());
    let err = reader.skip(-3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Contract);
    assert_eq!(reader.get_ref().position(), 0);
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Tag,
    Short,
    Int,
    Long,
    Float,
    Double,
    Str,
}

const STEPS: [Step; 8] = [
    Step::Tag,
    Step::Short,
    Step::Int,
    Step::Long,
    Step::Float,
    Step::Double,
    Step::Str,
    Step::Str,
];

const LONG_TEXT: &str = "The quick brown fox jumps over the lazy dog, twice over for length.";

fn write_step(w: &mut Writer<Vec<u8>>, step: Step) -> nbtio::Result<()> {
    match step {
        Step::Tag => w.write_tag_type(TagType::IntArray),
        Step::Short => w.write_i16(-12345),
        Step::Int => w.write_i32(-123_456_789),
        Step::Long => w.write_i64(i64::MIN + 7),
        Step::Float => w.write_f32(6.25),
        Step::Double => w.write_f64(-1e300),
        Step::Str => w.write_string(LONG_TEXT),
    }
}

fn check_step<R: Read>(r: &mut Reader<'_, R>, step: Step) -> nbtio::Result<()> {
    match step {
        Step::Tag => assert_eq!(r.read_tag_type()?, TagType::IntArray),
        Step::Short => assert_eq!(r.read_i16()?, -12345),
        Step::Int => assert_eq!(r.read_i32()?, -123_456_789),
        Step::Long => assert_eq!(r.read_i64()?, i64::MIN + 7),
        Step::Float => assert_eq!(r.read_f32()?, 6.25),
        Step::Double => assert_eq!(r.read_f64()?, -1e300),
        Step::Str => assert_eq!(r.read_string()?, LONG_TEXT),
    }
    Ok(())
}

#[test]
fn test_truncation_fails_with_eof() {
    for options in all_options() {
        let mut writer = Writer::new(Vec::new(), options);
        let mut ends = Vec::new();
        for step in STEPS {
            write_step(&mut writer, step).unwrap();
            ends.push(writer.get_ref().len());
        }
        let data = writer.into_inner();

        for cut in 0..data.len() {
            let mut reader = Reader::new(&data[..cut], options);
            for (step, &end) in STEPS.iter().zip(&ends) {
                let result = check_step(&mut reader, *step);
                if end <= cut {
                    result.unwrap();
                } else {
                    let err = result.unwrap_err();
                    assert!(err.is_eof(), "{options:?} cut {cut} {step:?}: {err}");
                    break;
                }
            }
        }
    }
}

#[test]
fn test_tag_type_boundary() {
    let mut reader = Reader::new(&[12u8, 13, 0xff][..], Options::big_endian());
    assert_eq!(reader.read_tag_type().unwrap(), TagType::MAX);

    let err = reader.read_tag_type().unwrap_err();
    assert!(matches!(err, Error::InvalidTagType(13)));
    assert_eq!(err.kind(), ErrorKind::Format);

    assert!(matches!(
        reader.read_tag_type(),
        Err(Error::InvalidTagType(0xff))
    ));
}
