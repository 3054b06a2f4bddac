/*!
# Introduction to GPCD Assembly

A GPCD terminal is a tiny computer. It has three registers, 256 cells of
memory and a handful of pins wired to the world around it. Programs are
written in a small assembly language and run one instruction per tick.

Start the monitor with a program file and you are greeted by a prompt.

<pre><code>&nbsp;  $ gpcd countdown.asm
&nbsp;  GPCD MONITOR
&nbsp;  LOADED 12 CELLS
&nbsp;> run
&nbsp;  HALTED
&nbsp;> regs
&nbsp;  PC=12  X=0   Y=0   R=0   HALTED
</code></pre>

## Source layout

A program is a sequence of instructions and labels. Line breaks carry no
meaning and any character the assembler does not recognize is skipped.
There is no comment syntax.

```text
        mov 10, #X
_loop:  sub 1, #X
        cmp #X, 4
        jmc _loop
        hlt
```

An instruction is a mnemonic followed by comma separated operands.

| Syntax      | Meaning |
|-------------|---------|
| `42` `0x2A` | immediate value |
| `_name`     | immediate holding the index of a label |
| `#X` `#Y` `#R` | register |
| `$expr`     | memory address |
| `@n`        | pin number |
| `"text"`    | one immediate per character |

Expressions combine numbers, labels and parentheses with `+` and `-`.
They group to the right, so `10 - 2 + 3` is `10 - (2 + 3)`.

Numbers containing an `x` or a letter `a` to `f` are hexadecimal, all
others decimal. Everything is 8 bits; larger values wrap.

## Labels

`name:` marks the current position. A label can only be used *after* it is
declared. A reference above the declaration quietly becomes 0 and a warning
is logged. Run the monitor with `--forward-labels` to assemble in two
passes instead.

## Memory

| Range     | Use |
|-----------|-----|
| 0 - 199   | program, read only while running |
| 200       | free |
| 201 - 255 | pins 0 to 54 |

Writing into the program region raises `PROTECTION FAULT`.
*/
