/*!
# Instruction Reference

Operands are read left to right. An operand of the wrong kind raises
`OPERAND TYPE FAULT` and stops the step where it stands.
*/

pub mod MOV {
    /*!
    ## `mov src, #reg` Copies a value into a register.
    `src` may be an immediate, a register or an address.
    ```text
    mov $0xC9, #Y
    ```
    */
}

pub mod JMP {
    /*!
    ## `jmp target` Continues execution at `target`.
    `target` is an immediate or a register.
    */
}

pub mod CAL {
    /*!
    ## `cal target` Calls a subroutine.
    Pushes the address of the next instruction and jumps to `target`.
    */
}

pub mod RET {
    /*!
    ## `ret` Returns from a subroutine.
    With nothing left to return to, the machine halts.
    */
}

pub mod CMP {
    /*!
    ## `cmp #reg, code` Compares a register against zero.
    Sets `R` to 1 when the test holds, 0 otherwise.

    | code | test |
    |------|------|
    | 0 | `= 0` |
    | 1 | `<> 0` |
    | 2 | `< 0` (never true) |
    | 3 | `<= 0` |
    | 4 | `> 0` |
    | 5 | `>= 0` (always true) |
    */
}

pub mod JMC {
    /*!
    ## `jmc target` Jumps when `R` is 1.
    ```text
    _loop: sub 1, #X
           cmp #X, 4
           jmc _loop
    ```
    */
}

pub mod ARITHMETIC {
    /*!
    ## `add` `sub` `and` `or` `xor` `src, #reg`
    `reg = reg op src`, wrapping at 8 bits. Note `sub 1, #X` decrements X.

    ## `not #reg`
    Complements every bit of the register.
    */
}

pub mod WRO {
    /*!
    ## `wro src, @pin` Writes a value to a pin.
    */
}

pub mod RDI {
    /*!
    ## `rdi pin, #reg` Blocking read from a pin.
    Copies the pin into the register and raises the interrupt flag. The
    machine then stays on this instruction, refreshing the register every
    tick. The host clears the flag with `release` once it has supplied
    input, but the next tick enters `rdi` again.
    */
}

pub mod STR {
    /*!
    ## `str #reg, $addr` Stores a register into memory.
    ```text
    str #X, $0xC9+5
    ```
    */
}

pub mod MISC {
    /*!
    ## `nop` Does nothing.
    ## `hlt` Halts the machine.
    ## `rst` Resets registers, pins, the call stack and the program counter.
    The program itself is kept.
    ## `db data...` Inline data. Skipped when executed.
    ```text
    db "HELLO", 0
    ```
    */
}
