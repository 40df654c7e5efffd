use criterion::{black_box, criterion_group, criterion_main, Criterion};
use legv8_disasm::{decode, Disassembler, OpcodeTable};

fn benchmark_instruction_decoding(c: &mut Criterion) {
    let table = OpcodeTable::legv8().unwrap();

    c.bench_function("decode_r_format", |b| {
        b.iter(|| {
            decode(&table, black_box("10001011000000100000000000100011"), black_box(96)).unwrap()
        })
    });

    c.bench_function("decode_data_word", |b| {
        b.iter(|| {
            decode(&table, black_box("11111111111111111111111111110110"), black_box(96)).unwrap()
        })
    });
}

fn benchmark_program(c: &mut Criterion) {
    let program = vec![
        "10001011000000100000000000100011",
        "10010001000000000001000000100001",
        "10110100000000000000000001100001",
        "00010100000000000000000000000101",
        "11111110110111101111111111100111",
        "11111111111111111111111111111111",
    ];

    c.bench_function("disassemble_program", |b| {
        let mut disassembler = Disassembler::legv8().unwrap();
        b.iter(|| {
            disassembler.reset();
            disassembler.disassemble(black_box(&program)).unwrap()
        })
    });
}

criterion_group!(benches, benchmark_instruction_decoding, benchmark_program);
criterion_main!(benches);
