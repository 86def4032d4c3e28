//! Configuration constants for STM32F103 firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 8_000_000;

/// SysTick runs from the core clock divided by this
pub const SYS_TICK_CLK_DIV: u32 = 8;

/// SysTick counter range (24 bits)
pub const SYS_TICK_MAX_TICKS: u32 = 0x0100_0000;

/// UART baud rate
pub const UART_BAUD: u32 = 115_200;

/// Serial receive and transmit ring size in bytes
pub const BYTE_RING_SIZE: usize = 256;

/// Number of software timers in the pool
pub const MAX_SW_TIMERS: usize = 4;

/// TIM1 tick period in microseconds (2kHz)
pub const USEC_PER_TIMER_TICK: u32 = 500;

/// TIM1 is a 16-bit up counter
pub const TIMER_WRAP_OFFSET: u32 = 0xFFFF + 1;

/// Scheduler slots per major cycle
pub const NUM_MINOR_CYCLES: usize = 10;

/// Scheduler minor cycle in milliseconds
pub const MINOR_CYCLE_MS: u32 = 100;

/// Morse playback tick in milliseconds. Must match one dot.
pub const MORSE_TICK_MS: u32 = 100;

/// Longest message the serial line encoder buffers
pub const MAX_MESSAGE_LEN: usize = 40;

/// Pause between beacon repetitions in seconds
pub const MORSE_REPEAT_DELAY_S: u32 = 3;

/// Log records retained in RAM
pub const LOG_CAPACITY: usize = 16;

/// Error trap LED half period in milliseconds
pub const FAULT_BLINK_MS: u32 = 250;
