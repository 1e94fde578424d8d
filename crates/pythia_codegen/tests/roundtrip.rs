//! Parse, generate, re-parse: the two trees must be equal under the
//! position-ignoring `PartialEq`.

use pythia_codegen::{generate, Config};
use pythia_parser::parse;

fn assert_roundtrip_with(config: &Config, source: &str) {
    let first = parse(source).unwrap_or_else(|err| panic!("cannot parse {source:?}: {err}"));
    let rendered = generate(&first, config);
    let second =
        parse(&rendered).unwrap_or_else(|err| panic!("cannot reparse {rendered:?}: {err}"));
    assert_eq!(first, second, "regenerated as:\n{rendered}");
}

fn assert_roundtrip(sources: &[&str]) {
    for source in sources {
        assert_roundtrip_with(&Config::default(), source);
    }
}

#[test]
fn expressions() {
    assert_roundtrip(&[
        "x = 1 + 2 * 3 - 4 / 5 // 6 % 7\n",
        "x = (1 + 2) * (3 - 4)\n",
        "x = a | b ^ c & d << e >> f\n",
        "x = 2 ** -3 ** (4 + 1)\n",
        "x = ~a + -b - +c\n",
        "ok = not a or b and not c\n",
        "ok = 0 <= i < len(xs) != flag is None\n",
        "x = a if b else c if d else e\n",
        "f = lambda a, /, b, *, c=1, **kw: (a, b, c, kw)\n",
        "x = (y := compute()) + y\n",
        "t = 1, 2, (3, 4), ()\n",
        "x = matrix @ vector\n",
        "x = a.b.c[1].d(2).e\n",
        "s = x[::2, 1:, :n, ...]\n",
        "v = x[()]\n",
        "x = *a, *b\n",
    ])
}

#[test]
fn literals() {
    assert_roundtrip(&[
        "n = 0b1010_0101 + 0o777 + 0xdead_beef + 123_456\n",
        "x = 3.14 + .5 + 10. + 1e-9 + 1_0.5e2\n",
        "z = 1j + 2.5j\n",
        "s = 'single' + \"double\" + '''triple\nline'''\n",
        "s = 'it\\'s' + \"qu\\\"ote\" + 'tab\\there'\n",
        "r = r'\\d+\\s*' + rb'\\x00'\n",
        "b = b'bytes\\n' + b'\\x00\\xff'\n",
        "u = u'legacy' + 'joined' 'up'\n",
        "c = True, False, None, ...\n",
        "big = 123456789012345678901234567890\n",
    ])
}

#[test]
fn comprehensions() {
    assert_roundtrip(&[
        "xs = [x for x in range(10)]\n",
        "xs = [x * y for x in a for y in b if x != y if x]\n",
        "s = {ch.lower() for ch in text}\n",
        "d = {k: v for k, v in pairs.items() if k}\n",
        "g = (line.strip() for line in handle)\n",
        "total = sum(x ** 2 for x in xs)\n",
        "flat = [x for row in grid for x in row]\n",
        "async def f():\n    return [x async for x in aiter() if x]\n",
        "nested = [[y for y in row] for row in grid]\n",
    ])
}

#[test]
fn fstrings() {
    assert_roundtrip(&[
        "s = f'hello {name}'\n",
        "s = f'{x!r} and {y!s:>10}'\n",
        "s = f'{value:{width}.{precision}}'\n",
        "s = f'{{escaped}} {real}'\n",
        "s = f'{a + b} {c * d}'\n",
        "s = f'nested {f\"inner {x}\"}'\n",
        "s = 'plain' f' and {formatted}'\n",
        "s = f'{ {k: v for k, v in items} }'\n",
        "s = f'{(lambda: 1)()}'\n",
    ])
}

#[test]
fn pattern_matching() {
    assert_roundtrip(&[
        concat!(
            "match point:\n",
            "    case Point(x=0, y=0):\n",
            "        origin()\n",
            "    case Point(x=0, y=y) | Point(x=x, y=0):\n",
            "        axis(x, y)\n",
            "    case Point():\n",
            "        free()\n",
        ),
        concat!(
            "match seq:\n",
            "    case []:\n",
            "        empty()\n",
            "    case [x]:\n",
            "        single(x)\n",
            "    case [first, *rest]:\n",
            "        split(first, rest)\n",
        ),
        concat!(
            "match config:\n",
            "    case {'mode': 'fast', **rest}:\n",
            "        fast(rest)\n",
            "    case {'mode': mode} if mode in allowed:\n",
            "        run(mode)\n",
        ),
        concat!(
            "match value:\n",
            "    case 0 | 1 | 2:\n",
            "        small()\n",
            "    case -1 | 1 + 2j:\n",
            "        odd()\n",
            "    case None | True | False:\n",
            "        singleton()\n",
            "    case str() | bytes() as text:\n",
            "        handle(text)\n",
            "    case (a, b):\n",
            "        pair(a, b)\n",
            "    case _:\n",
            "        fallback()\n",
        ),
        concat!(
            "match command.split():\n",
            "    case [Point.ORIGIN]:\n",
            "        home()\n",
        ),
    ])
}

#[test]
fn async_constructs() {
    assert_roundtrip(&[
        concat!(
            "async def fetch(url):\n",
            "    async with session.get(url) as response:\n",
            "        return await response.json()\n",
        ),
        concat!(
            "async def drain(queue):\n",
            "    async for item in queue:\n",
            "        await process(item)\n",
            "    else:\n",
            "        await close(queue)\n",
        ),
        "async def gather():\n    return [await f() for f in tasks]\n",
    ])
}

#[test]
fn decorators() {
    assert_roundtrip(&[
        concat!(
            "@app.route('/home', methods=['GET'])\n",
            "@functools.cache\n",
            "def home():\n",
            "    return render()\n",
        ),
        concat!(
            "@register\n",
            "class Plugin(Base):\n",
            "    name = 'plugin'\n",
        ),
        concat!(
            "@decorators[0]\n",
            "async def wrapped():\n",
            "    pass\n",
        ),
    ])
}

#[test]
fn statements() {
    assert_roundtrip(&[
        concat!(
            "def f(a, b, /, c=1, *args, d, e=2, **kw):\n",
            "    global counter\n",
            "    counter += 1\n",
            "    return a, b\n",
        ),
        concat!(
            "class Meta(type, metaclass=ABCMeta):\n",
            "    registry: dict[str, type] = {}\n",
            "\n",
            "    def __init_subclass__(cls, **kwargs):\n",
            "        super().__init_subclass__(**kwargs)\n",
        ),
        concat!(
            "try:\n",
            "    risky()\n",
            "except (ValueError, TypeError) as err:\n",
            "    recover(err)\n",
            "except Exception:\n",
            "    raise RuntimeError('unexpected') from None\n",
            "else:\n",
            "    commit()\n",
            "finally:\n",
            "    cleanup()\n",
        ),
        concat!(
            "try:\n",
            "    batch()\n",
            "except* OSError as eg:\n",
            "    retry(eg.exceptions)\n",
        ),
        concat!(
            "for i, item in enumerate(items):\n",
            "    if not item:\n",
            "        continue\n",
            "    elif item is sentinel:\n",
            "        break\n",
            "else:\n",
            "    report()\n",
        ),
        concat!(
            "with (open(a) as f, open(b) as g):\n",
            "    copy(f, g)\n",
        ),
        concat!(
            "def outer():\n",
            "    state = 0\n",
            "\n",
            "    def inner():\n",
            "        nonlocal state\n",
            "        state += 1\n",
            "    return inner\n",
        ),
        concat!(
            "import os.path as path, sys\n",
            "from ...package.mod import (first, second as two,)\n",
            "from . import sibling\n",
            "del cache['key'], temp\n",
            "assert invariant(), 'broken'\n",
            "x: list[int] = []\n",
            "(y): int = 0\n",
            "obj.attr, xs[0] = xs[0], obj.attr\n",
        ),
        concat!(
            "type Alias = int | str\n",
            "type Pair[T] = tuple[T, T]\n",
            "def first[T: Comparable](xs: list[T]) -> T:\n",
            "    return min(xs)\n",
            "class Box[T]:\n",
            "    value: T\n",
        ),
        concat!(
            "def stream():\n",
            "    while chunk := read():\n",
            "        got = yield chunk\n",
            "        if got is None:\n",
            "            yield from flush()\n",
        ),
        concat!(
            "def pairs():\n",
            "    x = (yield), 2\n",
            "    y = (yield 1), 2\n",
            "    return (yield x)\n",
        ),
        "if x:\n    pass\nelif y:\n    pass\n",
        "while True:\n    break\n",
        "match x:\n    case _:\n        pass\n",
        "match (a, b):\n    case _:\n        pass\n",
        "match[0] = 1\n",
        "type = 'soft keyword'\n",
    ])
}

#[test]
fn formatting_variants_compare_equal() {
    // Differently laid-out sources of the same program converge on one
    // rendering, and that rendering parses back to the shared tree.
    let spread = "result = foo(\n    1,\n    2,\n)\n";
    let tight = "result = foo(1, 2)\n";
    let first = parse(spread).expect("source should parse");
    let second = parse(tight).expect("source should parse");
    assert_eq!(first, second);
    assert_eq!(
        generate(&first, &Config::default()),
        generate(&second, &Config::default())
    );
}

#[test]
fn alternate_configs_still_roundtrip() {
    let config = Config {
        indent_width: 2,
        quote: '"',
        trailing_comma: true,
        max_line_length: 120,
    };
    for source in [
        "xs = [1, 2, {'a': 'b'}]\n",
        "s = f'{x} and {y!r}'\n",
        concat!(
            "def f(a, b=1):\n",
            "    if a:\n",
            "        return {b, a}\n",
            "    return (a,)\n",
        ),
    ] {
        assert_roundtrip_with(&config, source);
    }
}

#[test]
fn generated_output_is_stable() {
    // A second generate-parse cycle reproduces the first rendering exactly.
    let source = concat!(
        "class Walker:\n",
        "    def visit(self, node, *, depth=0):\n",
        "        print(f'{\" \" * depth}{node!r}')\n",
        "        for child in node.children:\n",
        "            self.visit(child, depth=depth + 1)\n",
    );
    let config = Config::default();
    let first = generate(&parse(source).expect("source should parse"), &config);
    let second = generate(&parse(&first).expect("rendering should parse"), &config);
    assert_eq!(first, second);
}
